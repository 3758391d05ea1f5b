//! 캔들 릴레이 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # BTC/USDT 1분봉을 CSV로 저장
//! relay fetch -m binance:USDT:BTC -f 2019-02-01 -t "2019-02-03 12:00"
//!
//! # JSON lines로 저장, 5분봉
//! relay fetch -m binance:USDT:BTC -f 2019-02-01 -t 2019-02-10 --format json --candle-size 5m
//!
//! # 원격 캐시 구간 보기
//! relay scan -m binance:USDT:BTC
//!
//! # 첫 세그먼트 계획 미리보기
//! relay plan -m binance:USDT:BTC -f 2019-02-01 -t 2019-02-10
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relay_core::{CandleSize, LogConfig, Market, RelayConfig};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Instrument};

use relay_cli::commands::fetch::{default_output_path, fetch_to_file, FetchConfig, OutputFormat};
use relay_cli::commands::plan::{plan_first_segment, print_plan};
use relay_cli::commands::scan::{print_ranges, scan_market};
use relay_cli::commands::{build_host, parse_window};

#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Candle relay CLI - 원격 캔들 호스트 구간 스트리밍", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = "config/relay.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 구간 캔들을 스트리밍해 파일로 저장
    Fetch {
        /// 마켓 (exchange:currency:asset, 예: binance:USDT:BTC)
        #[arg(short, long)]
        market: String,

        /// 시작 시각 (RFC 3339, YYYY-MM-DD HH:MM, YYYY-MM-DD)
        #[arg(short = 'f', long)]
        from: String,

        /// 종료 시각
        #[arg(short, long)]
        to: String,

        /// 출력 파일 경로 (자동 생성됨)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 출력 형식 (csv, json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// 캔들 크기 (기본: 설정값)
        #[arg(long)]
        candle_size: Option<String>,
    },

    /// 원격 캐시 구간 조회
    Scan {
        /// 마켓 (exchange:currency:asset)
        #[arg(short, long)]
        market: String,
    },

    /// 첫 세그먼트 계획 미리보기 (캔들 조회 없음)
    Plan {
        /// 마켓 (exchange:currency:asset)
        #[arg(short, long)]
        market: String,

        /// 시작 시각
        #[arg(short = 'f', long)]
        from: String,

        /// 종료 시각
        #[arg(short, long)]
        to: String,
    },
}

fn parse_market(market: &str) -> Result<Market> {
    market
        .parse()
        .with_context(|| format!("Invalid market: {}. Expected exchange:currency:asset", market))
}

/// Ctrl-C 수신 시 토큰을 취소합니다.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C 수신, 스트리밍 취소");
            child.cancel();
        }
    });
    token
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = RelayConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config.display()))?;

    relay_core::init_logging(LogConfig::from_settings(&settings.logging))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Fetch {
            market,
            from,
            to,
            output,
            format,
            candle_size,
        } => {
            let market = parse_market(&market)?;
            let (from, to) = parse_window(&from, &to)?;
            let format: OutputFormat = format.parse()?;
            let candle_size = match candle_size {
                Some(size) => size
                    .parse::<CandleSize>()
                    .with_context(|| format!("Invalid candle size: {}", size))?,
                None => settings.import.candle_size,
            };

            let output_path = output
                .unwrap_or_else(|| default_output_path(&market, candle_size, from, to, format));

            let span = relay_core::relay_span!("fetch", market, from, to);
            let config = FetchConfig {
                market,
                from,
                to,
                candle_size,
                format,
                output_path: output_path.clone(),
            };

            match fetch_to_file(config, &settings, cancel_on_ctrl_c())
                .instrument(span)
                .await
            {
                Ok(report) => {
                    info!(candles = report.candles, "가져오기 완료");
                    println!("\n캔들 가져오기 완료: {} 캔들 ({} 배치)", report.candles, report.batches);
                    println!("저장 위치: {}", output_path.display());
                }
                Err(e) => {
                    error!("Fetch failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Scan { market } => {
            let market = parse_market(&market)?;
            let host = build_host(&settings)?;
            let ranges = scan_market(&*host, &market).await?;
            print_ranges(&market, &ranges);
        }

        Commands::Plan { market, from, to } => {
            let market = parse_market(&market)?;
            let (from, to) = parse_window(&from, &to)?;
            let host = build_host(&settings)?;
            let plan = plan_first_segment(&*host, &market, from, to, &settings.import).await?;
            print_plan(&market, &plan);
        }
    }

    Ok(())
}
