//! 거래 수수료 스케줄.
//!
//! 마켓별 비례 수수료율과 고정 출금 수수료를 제공합니다.
//! 수수료율은 정적이며 외부 입력에 의존하지 않습니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Market;

/// KRW 마켓 거래 수수료율 (0.05%).
pub const KRW_FEE_RATE: Decimal = dec!(0.0005);

/// BTC/USDT 마켓 거래 수수료율 (0.25%).
pub const COIN_FEE_RATE: Decimal = dec!(0.0025);

/// 고정 출금 수수료 (원).
pub const WITHDRAWAL_FEE_KRW: Decimal = dec!(1000);

/// 마켓별 수수료 조회.
pub struct FeeSchedule;

impl FeeSchedule {
    /// 마켓의 비례 거래 수수료율을 반환합니다.
    pub fn fee_rate(market: Market) -> Decimal {
        match market {
            Market::Krw => KRW_FEE_RATE,
            Market::Btc | Market::Usdt => COIN_FEE_RATE,
        }
    }

    /// 고정 출금 수수료를 반환합니다.
    pub fn withdrawal_fee() -> Decimal {
        WITHDRAWAL_FEE_KRW
    }
}
