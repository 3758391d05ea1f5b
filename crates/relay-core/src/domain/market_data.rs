//! 시장 데이터 타입.
//!
//! 원격 호스트가 반환하는 캔들 레코드를 정의합니다. 레코드는 시작 시각으로
//! 식별되며, 배치는 시작 시각 오름차순으로 도착합니다.

use crate::types::{Price, Quantity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV 캔들 데이터.
///
/// 원격 API에서는 `start`가 유닉스 초로 표현됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// 캔들 시작 시간
    #[serde(with = "chrono::serde::ts_seconds")]
    pub start: DateTime<Utc>,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 거래량 가중 평균가
    #[serde(default)]
    pub vwp: Price,
    /// 거래량
    pub volume: Quantity,
    /// 체결 건수
    #[serde(default)]
    pub trades: u64,
}

impl Candle {
    /// 가격만으로 캔들을 생성합니다. 가중 평균가는 종가로 채웁니다.
    pub fn new(
        start: DateTime<Utc>,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Quantity,
    ) -> Self {
        Self {
            start,
            open,
            high,
            low,
            close,
            vwp: close,
            volume,
            trades: 0,
        }
    }

    /// CSV 한 줄로 변환합니다. 열 순서는 [`Candle::CSV_HEADER`]와 같습니다.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.start.timestamp(),
            self.open,
            self.high,
            self.low,
            self.close,
            self.vwp,
            self.volume,
            self.trades
        )
    }

    /// CSV 헤더.
    pub const CSV_HEADER: &'static str = "start,open,high,low,close,vwp,volume,trades";
}
