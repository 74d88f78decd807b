//! 정밀한 금융 계산을 위한 Decimal 유틸리티.
//!
//! 모든 금액과 비율은 이진 부동소수점 대신 `rust_decimal::Decimal`을
//! 사용합니다. 원 단위 반올림은 표시 경계에서만 수행합니다.

use rust_decimal::Decimal;

/// 금액 타입 (원 단위, 소수부 허용).
pub type Amount = Decimal;

/// 비율 타입 (백분율 값, 예: 2.5 = 2.5%).
pub type Rate = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 원 단위로 반올림합니다 (표시 경계 전용).
    fn round_krw(&self) -> Decimal;

    /// 백분율 문자열로 변환합니다 (예: "18.17%").
    ///
    /// 값이 이미 백분율 단위라고 가정합니다.
    fn to_percent_string(&self) -> String;

    /// 0보다 큰 금액인지 확인합니다.
    fn is_positive_amount(&self) -> bool;
}

impl DecimalExt for Decimal {
    fn round_krw(&self) -> Decimal {
        self.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_percent_string(&self) -> String {
        let rounded =
            self.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2}%", rounded)
    }

    fn is_positive_amount(&self) -> bool {
        *self > Decimal::ZERO
    }
}
