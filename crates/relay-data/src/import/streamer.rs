//! 캐시 인식 구간 스트리머.
//!
//! 요청 구간을 최대 `max_segment` 길이의 세그먼트로 나누어 순차적으로 가져옵니다.
//! 매 반복마다 원격 캐시 구간을 다시 조회하고, 미캐시 세그먼트는 조회 전에
//! 원격 import로 예열합니다. 원격 작업은 한 번에 하나만 진행됩니다.
//!
//! # 종료 조건
//!
//! - 커서가 요청 끝에 도달: 정상 종료
//! - 조회 결과가 비었거나 커서 이후 캔들이 없음: 정상 종료 (원격에 더 이상 데이터 없음)
//! - 원격 작업 실패 또는 취소: 즉시 오류 종료, 재시도 없음

use chrono::{DateTime, Utc};
use futures::Stream;
use relay_core::{Candle, ImportConfig, Market};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::segment::resolve_segment;
use super::warm::warm_range;
use crate::error::{DataError, Result};
use crate::host::CandleHost;

/// 스트리밍 결과 요약.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    /// 전달한 배치 수
    pub batches: usize,
    /// 전달한 캔들 수
    pub candles: usize,
    /// 예열한 세그먼트 수
    pub warmed_segments: usize,
    /// 마지막 커서 위치
    pub cursor: DateTime<Utc>,
}

/// 한 번의 스트리밍 실행 상태.
struct StreamState {
    cursor: DateTime<Utc>,
    end: DateTime<Utc>,
    resumed: bool,
    finished: bool,
    summary: StreamSummary,
}

impl StreamState {
    fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            cursor: from,
            end: to,
            resumed: false,
            finished: false,
            summary: StreamSummary {
                batches: 0,
                candles: 0,
                warmed_segments: 0,
                cursor: from,
            },
        }
    }
}

/// 원격 호스트에서 구간 캔들을 순차적으로 가져오는 스트리머.
pub struct RangeStreamer {
    host: Arc<dyn CandleHost>,
    market: Market,
    config: ImportConfig,
    cancel: Option<CancellationToken>,
}

impl RangeStreamer {
    /// 새 스트리머 생성.
    pub fn new(host: Arc<dyn CandleHost>, market: Market, config: ImportConfig) -> Self {
        Self {
            host,
            market,
            config,
            cancel: None,
        }
    }

    /// 취소 토큰 연결.
    ///
    /// 토큰이 취소되면 진행 중인 원격 작업을 중단하고 `DataError::Cancelled`로 끝납니다.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// 구간 `[from, to]`를 가져와 배치마다 `on_batch`를 호출합니다.
    ///
    /// `on_batch`는 비어 있지 않은 배치로만 도착 순서대로 호출됩니다.
    /// 반환값이 종료 신호입니다. 실패한 세그먼트의 배치는 전달되지 않습니다.
    /// `from >= to`이면 원격 호출 없이 바로 성공합니다.
    #[instrument(skip(self, on_batch), fields(market = %self.market))]
    pub async fn stream<F>(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        mut on_batch: F,
    ) -> Result<StreamSummary>
    where
        F: FnMut(Vec<Candle>),
    {
        let mut state = StreamState::new(from, to);

        while let Some(batch) = self.next_batch(&mut state).await? {
            on_batch(batch);
        }

        info!(
            batches = state.summary.batches,
            candles = state.summary.candles,
            warmed = state.summary.warmed_segments,
            cursor = %state.summary.cursor,
            "구간 스트리밍 완료"
        );

        Ok(state.summary)
    }

    /// 같은 루프를 배치 스트림으로 노출합니다.
    ///
    /// 0개 이상의 `Ok` 배치 뒤에 스트림이 끝나거나(성공), `Err` 하나를 낸 뒤 끝납니다.
    pub fn batches(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Stream<Item = Result<Vec<Candle>>> + '_ {
        futures::stream::unfold(StreamState::new(from, to), move |mut state| async move {
            let next = self.next_batch(&mut state).await;
            match next {
                Ok(Some(batch)) => Some((Ok(batch), state)),
                Ok(None) => None,
                Err(e) => Some((Err(e), state)),
            }
        })
    }

    /// 다음 배치를 가져옵니다. `Ok(None)`이면 정상 종료입니다.
    ///
    /// 오류가 발생하면 상태를 종료로 바꾸므로 이후 호출은 `Ok(None)`을 반환합니다.
    async fn next_batch(&self, state: &mut StreamState) -> Result<Option<Vec<Candle>>> {
        if state.finished || state.cursor >= state.end {
            return Ok(None);
        }

        match self.advance(state).await {
            Ok(Some(batch)) => Ok(Some(batch)),
            Ok(None) => {
                state.finished = true;
                Ok(None)
            }
            Err(e) => {
                state.finished = true;
                warn!(
                    market = %self.market,
                    cursor = %state.cursor,
                    error = %e,
                    "구간 스트리밍 실패"
                );
                Err(e)
            }
        }
    }

    async fn advance(&self, state: &mut StreamState) -> Result<Option<Vec<Candle>>> {
        if self.is_cancelled() {
            return Err(DataError::Cancelled);
        }

        let provisional_end = (state.cursor + self.config.max_segment()).min(state.end);

        // 1. 원격 캐시 구간 조회
        let cached_ranges = self.guard(self.host.scan_ranges(&self.market)).await?;

        // 2. 다음 세그먼트 결정
        let segment = resolve_segment(state.cursor, provisional_end, &cached_ranges);
        debug!(
            from = %segment.from,
            to = %segment.to,
            cached = segment.cached,
            known_ranges = cached_ranges.len(),
            "다음 세그먼트"
        );

        // 3. 미캐시 구간 예열
        if !segment.cached {
            let warm = warm_range(segment.from, segment.to, &self.config);
            info!(from = %warm.start, to = %warm.end, "캐시 예열");
            self.guard(self.host.import_and_wait(warm, &self.market))
                .await?;
            state.summary.warmed_segments += 1;
        }

        // 4. 캔들 조회
        let mut candles = self
            .guard(
                self.host
                    .fetch_candles(segment.range(), self.config.candle_size, &self.market),
            )
            .await?;

        // 첫 조회 이후 커서 위치의 캔들은 이미 전달됨
        let cursor = state.cursor;
        if state.resumed {
            candles.retain(|candle| candle.start > cursor);
        } else {
            candles.retain(|candle| candle.start >= cursor);
        }

        let Some(last_start) = candles.last().map(|candle| candle.start) else {
            debug!(cursor = %cursor, "새 캔들 없음, 스트리밍 종료");
            return Ok(None);
        };

        state.cursor = last_start;
        state.resumed = true;
        state.summary.batches += 1;
        state.summary.candles += candles.len();
        state.summary.cursor = last_start;

        Ok(Some(candles))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|token| token.is_cancelled())
    }

    /// 원격 작업을 취소 토큰과 경합시킵니다.
    async fn guard<T, Fut>(&self, operation: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(DataError::Cancelled),
                result = operation => result,
            },
            None => operation.await,
        }
    }
}
