//! 구간 캔들 스트리밍 후 파일 저장 명령어.
//!
//! 원격 호스트의 캐시 구간을 확인하면서 세그먼트 단위로 캔들을 받아
//! 도착하는 즉시 파일에 기록합니다. 진행률은 요청 구간 대비 커서 위치로 표시합니다.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use relay_core::{Candle, CandleSize, Market, RelayConfig, TimeRange};
use relay_data::{DataError, RangeStreamer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::build_host;

/// 출력 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 헤더가 있는 CSV
    #[default]
    Csv,
    /// 한 줄에 캔들 하나씩 JSON
    JsonLines,
}

impl OutputFormat {
    /// 기본 파일 확장자
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::JsonLines => "jsonl",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" | "jsonl" | "ndjson" => Ok(Self::JsonLines),
            other => anyhow::bail!("Invalid output format: {}. Supported: csv, json", other),
        }
    }
}

/// fetch 명령 설정
pub struct FetchConfig {
    pub market: Market,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub candle_size: CandleSize,
    pub format: OutputFormat,
    pub output_path: PathBuf,
}

/// fetch 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchReport {
    pub batches: usize,
    pub candles: usize,
}

/// 출력 경로 자동 생성: `data/{exchange}/{currency}_{asset}_{size}_{from}_to_{to}.{ext}`
pub fn default_output_path(
    market: &Market,
    candle_size: CandleSize,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    format: OutputFormat,
) -> PathBuf {
    PathBuf::from(format!(
        "data/{}/{}_{}_{}_{}_to_{}.{}",
        market.exchange,
        market.currency,
        market.asset,
        candle_size,
        from.format("%Y%m%d%H%M"),
        to.format("%Y%m%d%H%M"),
        format.extension()
    ))
}

/// 캔들 배치를 선택한 형식으로 기록하는 writer.
pub struct CandleWriter<W: Write> {
    inner: W,
    format: OutputFormat,
    written: usize,
}

impl<W: Write> CandleWriter<W> {
    /// writer 생성. CSV면 헤더를 먼저 씁니다.
    pub fn new(mut inner: W, format: OutputFormat) -> Result<Self> {
        if format == OutputFormat::Csv {
            writeln!(inner, "{}", Candle::CSV_HEADER)?;
        }
        Ok(Self {
            inner,
            format,
            written: 0,
        })
    }

    pub fn write_batch(&mut self, candles: &[Candle]) -> Result<()> {
        for candle in candles {
            match self.format {
                OutputFormat::Csv => writeln!(self.inner, "{}", candle.to_csv_row())?,
                OutputFormat::JsonLines => {
                    serde_json::to_writer(&mut self.inner, candle)?;
                    writeln!(self.inner)?;
                }
            }
        }
        self.written += candles.len();
        Ok(())
    }

    /// 버퍼를 비우고 기록한 캔들 수를 반환합니다.
    pub fn finish(mut self) -> Result<usize> {
        self.inner.flush()?;
        Ok(self.written)
    }
}

/// 스트리밍 실패 시 받은 캔들까지 기록하고 원래 오류를 반환합니다.
///
/// flush 실패는 경고로만 남기며 스트리밍 오류를 가리지 않습니다.
fn abort_stream<W: Write>(writer: CandleWriter<W>, error: DataError, market: &Market) -> anyhow::Error {
    if let Err(flush) = writer.finish() {
        warn!(error = %flush, "출력 파일 flush 실패");
    }
    anyhow::Error::new(error).context(format!("Streaming {} failed", market))
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn progress_bar(window: TimeRange) -> Result<ProgressBar> {
    let total = window.span().num_seconds().max(0) as u64;
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// 구간 캔들을 스트리밍해 파일로 저장합니다.
pub async fn fetch_to_file(
    config: FetchConfig,
    settings: &RelayConfig,
    cancel: CancellationToken,
) -> Result<FetchReport> {
    info!(
        market = %config.market,
        from = %config.from,
        to = %config.to,
        size = %config.candle_size,
        output = %config.output_path.display(),
        "구간 캔들 가져오기 시작"
    );

    let host = build_host(settings)?;
    let mut import = settings.import.clone();
    import.candle_size = config.candle_size;

    let streamer = RangeStreamer::new(host, config.market.clone(), import).with_cancellation(cancel);
    let mut writer = CandleWriter::new(create_output(&config.output_path)?, config.format)?;
    let pb = progress_bar(TimeRange::new(config.from, config.to))?;

    let mut batches = 0;
    let stream = streamer.batches(config.from, config.to);
    tokio::pin!(stream);

    while let Some(batch) = stream.next().await {
        let batch = match batch {
            Ok(batch) => batch,
            Err(e) => {
                pb.abandon_with_message("실패");
                return Err(abort_stream(writer, e, &config.market));
            }
        };

        writer.write_batch(&batch)?;
        batches += 1;

        if let Some(last) = batch.last() {
            pb.set_position((last.start - config.from).num_seconds().max(0) as u64);
            pb.set_message(last.start.format("%Y-%m-%d %H:%M").to_string());
        }
    }

    let candles = writer.finish()?;
    pb.finish_with_message("완료");

    info!(
        batches,
        candles,
        output = %config.output_path.display(),
        "구간 캔들 저장 완료"
    );

    Ok(FetchReport { batches, candles })
}
