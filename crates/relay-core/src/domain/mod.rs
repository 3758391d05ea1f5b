//! 캔들 릴레이 도메인 모델.

mod market;
mod market_data;
mod range;

pub use market::*;
pub use market_data::*;
pub use range::*;
