//! 원격 호스트에 요청하는 캔들 크기 정의.
//!
//! 원격 API는 캔들 크기를 분 단위 정수로 받습니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 캔들 크기 (조회 단위).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CandleSize {
    /// 1분봉
    #[default]
    M1,
    /// 5분봉
    M5,
    /// 15분봉
    M15,
    /// 30분봉
    M30,
    /// 1시간봉
    H1,
    /// 4시간봉
    H4,
    /// 일봉
    D1,
}

impl CandleSize {
    /// 분 단위 크기를 반환합니다 (원격 API 표기).
    pub fn minutes(&self) -> u32 {
        match self {
            CandleSize::M1 => 1,
            CandleSize::M5 => 5,
            CandleSize::M15 => 15,
            CandleSize::M30 => 30,
            CandleSize::H1 => 60,
            CandleSize::H4 => 4 * 60,
            CandleSize::D1 => 24 * 60,
        }
    }

    /// 간격 문자열로 변환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            CandleSize::M1 => "1m",
            CandleSize::M5 => "5m",
            CandleSize::M15 => "15m",
            CandleSize::M30 => "30m",
            CandleSize::H1 => "1h",
            CandleSize::H4 => "4h",
            CandleSize::D1 => "1d",
        }
    }
}

impl fmt::Display for CandleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandleSize {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1m" | "1" => Ok(CandleSize::M1),
            "5m" | "5" => Ok(CandleSize::M5),
            "15m" | "15" => Ok(CandleSize::M15),
            "30m" | "30" => Ok(CandleSize::M30),
            "1h" | "60" => Ok(CandleSize::H1),
            "4h" | "240" => Ok(CandleSize::H4),
            "1d" | "1440" => Ok(CandleSize::D1),
            other => Err(CoreError::InvalidCandleSize(other.to_string())),
        }
    }
}

impl TryFrom<String> for CandleSize {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CandleSize> for String {
    fn from(size: CandleSize) -> Self {
        size.as_str().to_string()
    }
}
