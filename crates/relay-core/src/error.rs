//! 코어 타입 파싱 에러.

use thiserror::Error;

/// 코어 도메인 에러.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// 잘못된 마켓 표기
    #[error("잘못된 마켓: {0} (형식: exchange:currency:asset)")]
    InvalidMarket(String),

    /// 지원하지 않는 캔들 크기
    #[error("잘못된 캔들 크기: {0}")]
    InvalidCandleSize(String),

    /// 해석할 수 없는 시각
    #[error("잘못된 시각: {0}")]
    InvalidTime(String),
}

/// 코어 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;
