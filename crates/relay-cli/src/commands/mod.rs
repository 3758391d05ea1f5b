//! CLI 명령어 구현 모듈.

pub mod fetch;
pub mod plan;
pub mod scan;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use relay_core::{parse_instant, RelayConfig, TimeRange};
use relay_data::HttpCandleHost;
use std::sync::Arc;

/// 명령행 시각 인자 쌍을 해석합니다. 시작이 종료보다 앞서야 합니다.
pub fn parse_window(from: &str, to: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = parse_instant(from).with_context(|| format!("Invalid start time: {}", from))?;
    let end = parse_instant(to).with_context(|| format!("Invalid end time: {}", to))?;

    if TimeRange::new(start, end).span() <= chrono::Duration::zero() {
        anyhow::bail!("Start time must be before end time ({} >= {})", start, end);
    }

    Ok((start, end))
}

/// 설정의 원격 섹션으로 HTTP 호스트를 만듭니다.
pub fn build_host(config: &RelayConfig) -> Result<Arc<HttpCandleHost>> {
    let host = HttpCandleHost::new(&config.remote)
        .with_context(|| format!("Failed to create HTTP client for {}", config.remote.base_url))?;
    Ok(Arc::new(host))
}
