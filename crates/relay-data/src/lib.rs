//! 원격 캔들 호스트에서 구간 데이터를 가져오는 crate.
//!
//! 이 crate는 다음을 제공합니다:
//! - 세그먼트 해석: 요청 구간과 원격 캐시 구간으로 다음 조회 구간 결정
//! - 구간 스트리머: 캐시 예열 → 조회 → 커서 전진을 반복하는 순차 루프
//! - 원격 호스트 trait 및 HTTP 구현

pub mod error;
pub mod host;
pub mod import;

pub use error::{DataError, Result};
pub use host::{CandleHost, HttpCandleHost};
pub use import::segment::resolve_segment;
pub use import::streamer::{RangeStreamer, StreamSummary};
pub use import::warm::warm_range;
