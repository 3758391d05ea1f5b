//! 통합 테스트용 스크립트 호스트.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use relay_core::{CachedRange, Candle, CandleSize, Market, TimeRange};
use relay_data::{CandleHost, DataError, Result};
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::Mutex;

/// 호스트에 들어온 호출 기록.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Scan,
    Import(TimeRange),
    Fetch(TimeRange),
}

/// 미리 정해 둔 응답을 돌려주는 호스트.
///
/// 조회 응답 큐가 비면 빈 배치를 반환합니다.
#[derive(Default)]
pub struct ScriptedHost {
    pub ranges: Mutex<Vec<CachedRange>>,
    pub fetches: Mutex<VecDeque<Result<Vec<Candle>>>>,
    pub import_error: Mutex<Option<String>>,
    pub scan_error: Mutex<Option<String>>,
    pub calls: Mutex<Vec<Call>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ranges(self, ranges: Vec<CachedRange>) -> Self {
        *self.ranges.lock().unwrap() = ranges;
        self
    }

    pub fn then_fetch(self, response: Result<Vec<Candle>>) -> Self {
        self.fetches.lock().unwrap().push_back(response);
        self
    }

    pub fn failing_import(self, message: &str) -> Self {
        *self.import_error.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn failing_scan(self, message: &str) -> Self {
        *self.scan_error.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> Vec<TimeRange> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Fetch(range) => Some(range),
                _ => None,
            })
            .collect()
    }

    pub fn import_calls(&self) -> Vec<TimeRange> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Import(range) => Some(range),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl CandleHost for ScriptedHost {
    async fn scan_ranges(&self, _market: &Market) -> Result<Vec<CachedRange>> {
        self.calls.lock().unwrap().push(Call::Scan);
        if let Some(message) = self.scan_error.lock().unwrap().clone() {
            return Err(DataError::Network(message));
        }
        Ok(self.ranges.lock().unwrap().clone())
    }

    async fn fetch_candles(
        &self,
        range: TimeRange,
        _candle_size: CandleSize,
        _market: &Market,
    ) -> Result<Vec<Candle>> {
        self.calls.lock().unwrap().push(Call::Fetch(range));
        self.fetches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn import_and_wait(&self, range: TimeRange, _market: &Market) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Import(range));
        match self.import_error.lock().unwrap().clone() {
            Some(message) => Err(DataError::ImportFailed(message)),
            None => Ok(()),
        }
    }
}

pub fn market() -> Market {
    Market::new("binance", "USDT", "BTC")
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn candle(start: DateTime<Utc>) -> Candle {
    Candle::new(start, dec!(100), dec!(101), dec!(99), dec!(100.5), dec!(3))
}

/// `start`부터 1분 간격으로 `count`개의 캔들.
pub fn minute_candles(start: DateTime<Utc>, count: i64) -> Vec<Candle> {
    (0..count)
        .map(|i| candle(start + Duration::minutes(i)))
        .collect()
}

/// 구간 전체를 덮는 캐시 구간.
pub fn covering(from: DateTime<Utc>, to: DateTime<Utc>) -> CachedRange {
    CachedRange::new(from.timestamp() - 60, to.timestamp() + 60)
}
