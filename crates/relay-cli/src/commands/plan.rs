//! 다음 세그먼트 계획 미리보기 명령어.
//!
//! 스트리머의 첫 반복과 같은 계산을 원격 조회 하나로 재현합니다.
//! 캔들 조회나 import는 실행하지 않습니다.

use anyhow::Result;
use chrono::{DateTime, Utc};
use relay_core::{ImportConfig, Market, Segment, TimeRange};
use relay_data::{resolve_segment, warm_range, CandleHost};

use super::scan::scan_market;

/// 첫 세그먼트 계획
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPlan {
    /// 스트리머가 처음 가져올 세그먼트
    pub segment: Segment,
    /// 미캐시일 때 예열할 구간
    pub warm: Option<TimeRange>,
    /// 겹치는 캐시 구간 수
    pub known_ranges: usize,
}

/// 구간 `[from, to]`의 첫 세그먼트 계획을 계산합니다.
pub async fn plan_first_segment(
    host: &dyn CandleHost,
    market: &Market,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    config: &ImportConfig,
) -> Result<SegmentPlan> {
    let ranges = scan_market(host, market).await?;
    let provisional_end = (from + config.max_segment()).min(to);
    let segment = resolve_segment(from, provisional_end, &ranges);

    let warm = (!segment.cached).then(|| warm_range(segment.from, segment.to, config));
    let known_ranges = ranges
        .iter()
        .filter(|range| range.overlaps(from.timestamp(), provisional_end.timestamp()))
        .count();

    Ok(SegmentPlan {
        segment,
        warm,
        known_ranges,
    })
}

/// 계획 출력
pub fn print_plan(market: &Market, plan: &SegmentPlan) {
    let state = if plan.segment.cached { "캐시됨" } else { "미캐시" };
    println!("\n=== {} 첫 세그먼트 ===", market);
    println!("  구간: {} → {}", plan.segment.from, plan.segment.to);
    println!("  상태: {} (겹치는 캐시 구간 {}개)", state, plan.known_ranges);
    if let Some(warm) = &plan.warm {
        println!("  예열: {} → {}", warm.start, warm.end);
    }
}
