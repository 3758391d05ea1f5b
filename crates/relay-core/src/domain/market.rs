//! 스트리밍 대상 마켓 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 원격 호스트에서 캔들을 조회할 마켓 (거래소 + 통화 + 자산).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Market {
    /// 거래소 이름 (예: "binance")
    pub exchange: String,
    /// 호가 통화 (예: "USDT")
    pub currency: String,
    /// 기준 자산 (예: "BTC")
    pub asset: String,
}

impl Market {
    /// 새 마켓을 생성합니다.
    pub fn new(
        exchange: impl Into<String>,
        currency: impl Into<String>,
        asset: impl Into<String>,
    ) -> Self {
        Self {
            exchange: exchange.into(),
            currency: currency.into(),
            asset: asset.into(),
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.exchange, self.currency, self.asset)
    }
}

impl FromStr for Market {
    type Err = CoreError;

    /// `exchange:currency:asset` 형식을 파싱합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [exchange, currency, asset]
                if !exchange.is_empty() && !currency.is_empty() && !asset.is_empty() =>
            {
                Ok(Self::new(
                    exchange.to_lowercase(),
                    currency.to_uppercase(),
                    asset.to_uppercase(),
                ))
            }
            _ => Err(CoreError::InvalidMarket(s.to_string())),
        }
    }
}
