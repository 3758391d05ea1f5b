//! 워크스페이스 전반에서 사용되는 공통 타입.

mod candle_size;
mod decimal;
mod instant;

pub use candle_size::*;
pub use decimal::*;
pub use instant::*;
