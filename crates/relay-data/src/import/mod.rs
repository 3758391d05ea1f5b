//! 캐시 인식 구간 가져오기.
//!
//! ```text
//! cursor ──► scan_ranges ──► resolve_segment ──┬─ cached ───────────────┐
//!                                              └─ uncached ─► warm ─────┤
//!                                                                      ▼
//!            cursor ◄── 마지막 캔들 시작 ◄── on_batch ◄── fetch_candles
//! ```

pub mod segment;
pub mod streamer;
pub mod warm;
