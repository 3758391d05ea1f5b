//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 원격 조회 및 스트리밍 오류.
///
/// 스트리밍 중에는 모든 오류가 치명적입니다. 재시도 여부를 구분하지 않습니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// 네트워크/연결 오류
    #[error("Network error: {0}")]
    Network(String),

    /// 타임아웃
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// 원격 호스트가 오류 상태를 반환함
    #[error("Remote error {status}: {message}")]
    Remote { status: u16, message: String },

    /// 응답 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 원격 import 실패
    #[error("Import failed: {0}")]
    ImportFailed(String),

    /// 호출자가 스트리밍을 취소함
    #[error("Stream cancelled")]
    Cancelled,

    /// 설정 오류
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_decode() {
            DataError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            DataError::Remote {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            DataError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
