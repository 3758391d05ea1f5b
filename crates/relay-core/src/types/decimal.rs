//! 캔들 값에 사용하는 Decimal 별칭.

use rust_decimal::Decimal;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 거래량 타입.
pub type Quantity = Decimal;
