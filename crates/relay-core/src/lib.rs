//! # Relay Core
//!
//! 캔들 릴레이의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 캔들(OHLCV) 데이터 구조체
//! - 마켓 및 캔들 크기 정의
//! - 시간 구간, 캐시 구간, 세그먼트 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
