//! 설정 관리.
//!
//! 이 모듈은 릴레이 설정을 정의하고 관리합니다.
//! 기본값 → TOML 파일 → 환경 변수(`RELAY__SECTION__KEY`) 순서로 덮어씁니다.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::CandleSize;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RelayConfig {
    /// 원격 호스트 설정
    #[serde(default)]
    pub remote: RemoteConfig,
    /// 가져오기(스트리밍) 설정
    #[serde(default)]
    pub import: ImportConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 원격 캔들 호스트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// API 기본 URL (예: "http://127.0.0.1:3000")
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// import 진행 상태 폴링 간격 (밀리초)
    pub import_poll_interval_ms: u64,
    /// import 완료 대기 최대 시간 (초)
    pub import_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            request_timeout_secs: 60,
            import_poll_interval_ms: 1000,
            import_timeout_secs: 3600,
        }
    }
}

impl RemoteConfig {
    /// 요청 타임아웃.
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    /// import 폴링 간격.
    pub fn import_poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.import_poll_interval_ms)
    }

    /// import 대기 한도.
    pub fn import_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.import_timeout_secs)
    }
}

/// 세그먼트 스트리밍 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportConfig {
    /// 한 번에 요청하는 최대 구간 (시간)
    pub max_segment_hours: i64,
    /// 캐시 예열 시 앞뒤로 덧붙이는 여유 (분)
    pub warm_padding_minutes: i64,
    /// 캐시 예열 최소 구간 (시간)
    pub min_warm_hours: i64,
    /// 조회 캔들 크기
    pub candle_size: CandleSize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_segment_hours: 48,
            warm_padding_minutes: 1,
            min_warm_hours: 24,
            candle_size: CandleSize::M1,
        }
    }
}

impl ImportConfig {
    /// 최대 세그먼트 길이.
    pub fn max_segment(&self) -> Duration {
        Duration::hours(self.max_segment_hours)
    }

    /// 예열 여유.
    pub fn warm_padding(&self) -> Duration {
        Duration::minutes(self.warm_padding_minutes)
    }

    /// 최소 예열 구간.
    pub fn min_warm_span(&self) -> Duration {
        Duration::hours(self.min_warm_hours)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl RelayConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("RELAY")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// TOML 문자열에서 설정을 로드합니다.
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
