//! 시간 구간 타입.
//!
//! - `TimeRange` - 요청/조회 구간 (양 끝 포함)
//! - `CachedRange` - 원격 캐시 인덱스가 보고한 구간 (유닉스 초)
//! - `Segment` - 다음에 가져올 구간과 캐시 여부

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 시간 구간.
///
/// 원격 호스트로 보낼 때는 양 끝을 모두 포함하는 구간으로 취급합니다.
/// `start <= end`는 호출자가 보장해야 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// 시작 시각
    pub start: DateTime<Utc>,
    /// 종료 시각
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// 새 구간을 생성합니다.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// 구간 길이를 반환합니다.
    pub fn span(&self) -> Duration {
        self.end - self.start
    }
}

/// 원격 캐시 인덱스가 보고한 캐시 구간 (유닉스 초).
///
/// 정렬되지 않았거나 서로 겹치거나 중간에 빈 곳이 있을 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CachedRange {
    /// 시작 (유닉스 초)
    pub from: i64,
    /// 종료 (유닉스 초)
    pub to: i64,
}

impl CachedRange {
    /// 새 캐시 구간을 생성합니다.
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// `(from, to)` 구간(유닉스 초)과 겹치는지 확인합니다.
    ///
    /// 경계가 맞닿기만 하는 구간은 겹치지 않는 것으로 봅니다.
    pub fn overlaps(&self, from: i64, to: i64) -> bool {
        self.to > from && self.from < to
    }
}

/// 다음에 가져올 세그먼트.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// 시작 (항상 요청 시작과 같음)
    pub from: DateTime<Utc>,
    /// 종료 (요청 종료를 넘지 않음)
    pub to: DateTime<Utc>,
    /// 원격 캐시에 이미 존재하는지 여부
    pub cached: bool,
}

impl Segment {
    /// 세그먼트를 시간 구간으로 변환합니다.
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.from, self.to)
    }
}
