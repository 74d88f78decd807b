//! 계산 엔진의 에러 타입.
//!
//! 모든 변형은 사용자 입력 또는 계산 상태에서 기인하며, 호출자에게
//! 동기적으로 보고됩니다. 재시도 대상이 아닙니다.

use rust_decimal::Decimal;
use thiserror::Error;

/// 수익 계산 에러.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// 잘못된 입력 (누락, 0 이하, 유한하지 않은 숫자)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 매도금액이 현재 총 자산 가치를 초과
    #[error("매도금액({sell_amount})이 총 자산 가치({total_value})보다 클 수 없습니다")]
    OverSell {
        /// 요청된 매도금액
        sell_amount: Decimal,
        /// 수익 반영 후 총 자산 가치
        total_value: Decimal,
    },

    /// 자산 가치가 0 이하로 붕괴 (수익률 -100% 이하)
    #[error("자산 가치가 0 이하입니다: {0}")]
    DegenerateValue(Decimal),
}

/// 계산 작업을 위한 Result 타입.
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = CalcError::OverSell {
            sell_amount: dec!(100),
            total_value: dec!(50),
        };
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = CalcError::InvalidInput("투자원금은 0보다 커야 합니다".to_string());
        assert!(err.to_string().contains("잘못된 입력"));
    }
}
