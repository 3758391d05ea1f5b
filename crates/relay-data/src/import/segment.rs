//! 세그먼트 해석.
//!
//! 요청 구간 `[from, to]`와 원격 캐시 구간 목록으로 다음에 가져올 세그먼트를
//! 결정합니다. 세그먼트는 항상 `from`에서 시작하며 다음 둘 중 하나입니다.
//!
//! - **미캐시**: 첫 캐시 데이터가 시작되기 직전까지 (또는 요청 끝까지)
//! - **캐시**: `from`을 덮는 연속 캐시 구간이 끝나는 지점까지 (요청 끝으로 제한)

use chrono::{DateTime, Utc};
use relay_core::{from_unix, CachedRange, Segment};

/// 연속으로 간주하는 최대 간격 (초). 원격 구간 경계의 반올림 오차를 허용합니다.
const CONTIGUITY_TOLERANCE_SECS: i64 = 1;

/// 요청 구간에서 다음에 가져올 세그먼트를 결정합니다.
///
/// 겹치는 캐시 구간을 `to` 오름차순으로 정렬한 뒤 첫 구간을 후보로 잡습니다.
/// 후보가 `from`보다 늦게 시작하면 그 앞은 미캐시 구간입니다. 그렇지 않으면
/// 나머지 구간을 같은 순서로 훑으며 후보 끝에서 1초 이내에 시작하는 구간을
/// 이어 붙입니다. 이어지지 않는 구간은 건너뛰고 계속 훑습니다.
///
/// `to` 기준 정렬이므로, `from`을 덮는 긴 구간이 있더라도 그보다 먼저 끝나면서
/// `from` 뒤에서 시작하는 짧은 구간이 있으면 앞부분을 미캐시로 보고합니다.
/// 이 경우 불필요한 예열이 한 번 일어날 뿐 데이터는 빠지지 않습니다.
pub fn resolve_segment(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    cached_ranges: &[CachedRange],
) -> Segment {
    let from_s = from.timestamp();
    let to_s = to.timestamp();

    let mut ranges: Vec<CachedRange> = cached_ranges
        .iter()
        .copied()
        .filter(|range| range.overlaps(from_s, to_s))
        .collect();
    ranges.sort_by_key(|range| range.to);

    let Some((first, rest)) = ranges.split_first() else {
        return Segment {
            from,
            to,
            cached: false,
        };
    };

    if first.from > from_s {
        return Segment {
            from,
            to: instant_or(first.from, to),
            cached: false,
        };
    }

    let mut covered_to = first.to;
    for next in rest {
        if next.from <= covered_to.saturating_add(CONTIGUITY_TOLERANCE_SECS) {
            covered_to = next.to;
        }
    }

    Segment {
        from,
        to: instant_or(covered_to.min(to_s), to),
        cached: true,
    }
}

/// 필터를 통과한 구간 경계는 `(from, to)` 안쪽이므로 변환이 실패하지 않지만,
/// 실패하면 요청 끝을 사용합니다.
fn instant_or(secs: i64, fallback: DateTime<Utc>) -> DateTime<Utc> {
    from_unix(secs).unwrap_or(fallback)
}
