//! 캔들 릴레이 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 원격 호스트에서 구간 캔들 스트리밍 후 파일 저장
//! - 원격 캐시 구간 조회
//! - 다음 세그먼트 계획 미리보기

pub mod commands;
