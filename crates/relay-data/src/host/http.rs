//! HTTP(JSON) 원격 캔들 호스트 클라이언트.
//!
//! # 엔드포인트
//!
//! | 작업 | 요청 |
//! |---|---|
//! | 캐시 구간 조회 | `POST /api/scan` |
//! | 캔들 조회 | `POST /api/getCandles` |
//! | import 시작 | `POST /api/import` |
//! | import 진행 상태 | `GET /api/imports` |
//!
//! `import_and_wait`는 import를 시작한 뒤 진행 목록에서 해당 id가 사라지거나
//! `done`이 될 때까지 폴링합니다.

use async_trait::async_trait;
use chrono::SecondsFormat;
use relay_core::{CachedRange, Candle, CandleSize, Market, RemoteConfig, TimeRange};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::CandleHost;
use crate::error::{DataError, Result};

/// HTTP 원격 캔들 호스트.
#[derive(Clone)]
pub struct HttpCandleHost {
    client: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
    import_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct DateRangeBody {
    from: String,
    to: String,
}

impl From<TimeRange> for DateRangeBody {
    fn from(range: TimeRange) -> Self {
        Self {
            from: range.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            to: range.end.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    watch: &'a Market,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CandlesRequest<'a> {
    watch: &'a Market,
    daterange: DateRangeBody,
    candle_size: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportRequest<'a> {
    watch: &'a Market,
    importer: ImporterBody,
    candle_writer: CandleWriterBody,
}

#[derive(Debug, Serialize)]
struct ImporterBody {
    daterange: DateRangeBody,
}

#[derive(Debug, Serialize)]
struct CandleWriterBody {
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct ImportStarted {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct ImportStatus {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// import id는 문자열 또는 숫자로 올 수 있습니다.
fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}

impl HttpCandleHost {
    /// 원격 설정으로 클라이언트를 생성합니다.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| DataError::Config(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            poll_interval: config.import_poll_interval(),
            import_timeout: config.import_timeout(),
        })
    }

    /// 기본 URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "원격 호스트 요청");

        let response = self.client.post(&url).json(body).send().await?;
        decode(path, response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "원격 호스트 요청");

        let response = self.client.get(&url).send().await?;
        decode(path, response).await
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DataError::Remote {
            status: status.as_u16(),
            message: format!("{} - {}", path, body),
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl CandleHost for HttpCandleHost {
    async fn scan_ranges(&self, market: &Market) -> Result<Vec<CachedRange>> {
        self.post("/api/scan", &ScanRequest { watch: market }).await
    }

    async fn fetch_candles(
        &self,
        range: TimeRange,
        candle_size: CandleSize,
        market: &Market,
    ) -> Result<Vec<Candle>> {
        let request = CandlesRequest {
            watch: market,
            daterange: range.into(),
            candle_size: candle_size.minutes(),
        };
        self.post("/api/getCandles", &request).await
    }

    async fn import_and_wait(&self, range: TimeRange, market: &Market) -> Result<()> {
        let request = ImportRequest {
            watch: market,
            importer: ImporterBody {
                daterange: range.into(),
            },
            candle_writer: CandleWriterBody { enabled: true },
        };
        let started: ImportStarted = self.post("/api/import", &request).await?;

        info!(
            market = %market,
            import_id = %started.id,
            from = %range.start,
            to = %range.end,
            "원격 import 시작"
        );

        let deadline = tokio::time::Instant::now() + self.import_timeout;
        loop {
            let imports: Vec<ImportStatus> = self.get("/api/imports").await?;

            match imports.into_iter().find(|status| status.id == started.id) {
                None => break,
                Some(status) => {
                    if let Some(error) = status.error.filter(|e| !e.is_null()) {
                        return Err(DataError::ImportFailed(format!(
                            "import {}: {}",
                            started.id, error
                        )));
                    }
                    if status.done {
                        break;
                    }
                }
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(DataError::Timeout(format!(
                    "import {} 완료 대기 시간 초과 ({:?})",
                    started.id, self.import_timeout
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        info!(market = %market, import_id = %started.id, "원격 import 완료");
        Ok(())
    }
}
