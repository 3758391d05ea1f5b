//! 원격 캔들 호스트 인터페이스.
//!
//! 스트리머는 이 trait을 통해서만 원격 호스트와 통신합니다.
//! 호스트 인스턴스는 스트리머마다 주입됩니다.

mod http;

pub use http::HttpCandleHost;

use async_trait::async_trait;
use relay_core::{CachedRange, Candle, CandleSize, Market, TimeRange};

use crate::error::Result;

/// 원격 캔들 호스트가 제공하는 세 가지 작업.
#[async_trait]
pub trait CandleHost: Send + Sync {
    /// 마켓에 대해 원격 캐시에 존재하는 구간 목록을 조회합니다.
    ///
    /// 순서는 보장되지 않으며 비어 있을 수 있습니다.
    async fn scan_ranges(&self, market: &Market) -> Result<Vec<CachedRange>>;

    /// 구간(양 끝 포함)의 캔들을 시작 시각 오름차순으로 조회합니다.
    ///
    /// 빈 결과도 유효한 응답입니다.
    async fn fetch_candles(
        &self,
        range: TimeRange,
        candle_size: CandleSize,
        market: &Market,
    ) -> Result<Vec<Candle>>;

    /// 구간에 대한 원격 import를 시작하고 완료될 때까지 기다립니다.
    async fn import_and_wait(&self, range: TimeRange, market: &Market) -> Result<()>;
}
