//! 원격 캐시 구간 조회 명령어.

use anyhow::{Context, Result};
use relay_core::{from_unix, CachedRange, Market};
use relay_data::CandleHost;

/// 마켓의 캐시 구간을 시작 시각 오름차순으로 반환합니다.
pub async fn scan_market(host: &dyn CandleHost, market: &Market) -> Result<Vec<CachedRange>> {
    let mut ranges = host
        .scan_ranges(market)
        .await
        .with_context(|| format!("Failed to scan cached ranges for {}", market))?;
    ranges.sort_by_key(|range| (range.from, range.to));
    Ok(ranges)
}

/// 캐시 구간 한 줄 표시: `시작 → 끝 (길이)`
pub fn format_range(range: &CachedRange) -> String {
    let bound = |secs: i64| {
        from_unix(secs)
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|_| secs.to_string())
    };
    let hours = (range.to - range.from) as f64 / 3600.0;
    format!("{} → {} ({:.1}h)", bound(range.from), bound(range.to), hours)
}

/// 조회 결과 출력
pub fn print_ranges(market: &Market, ranges: &[CachedRange]) {
    println!("\n=== {} 캐시 구간 ({}개) ===", market, ranges.len());
    if ranges.is_empty() {
        println!("  (없음)");
        return;
    }
    for range in ranges {
        println!("  {}", format_range(range));
    }
}
