//! 캐시 예열 구간 계산.

use chrono::{DateTime, Utc};
use relay_core::{ImportConfig, TimeRange};

/// 미캐시 세그먼트를 예열할 import 구간을 계산합니다.
///
/// 양 끝에 `warm_padding`을 덧붙이고, 구간이 `min_warm_span + warm_padding`보다
/// 짧으면 끝을 늘립니다. 조회 구간에는 영향을 주지 않습니다.
pub fn warm_range(from: DateTime<Utc>, to: DateTime<Utc>, config: &ImportConfig) -> TimeRange {
    let padding = config.warm_padding();
    let padded_from = from - padding;
    let padded_to = to + padding;
    let minimum_to = padded_from + config.min_warm_span() + padding;

    TimeRange::new(padded_from, padded_to.max(minimum_to))
}
