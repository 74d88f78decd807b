//! 분할매도 수익 계산 엔진.
//!
//! 투자원금, 수익률, 매도금액으로부터 실현/미실현 수익과 수수료 내역을
//! 계산합니다. 수수료를 반영하는 `compute`가 표준 경로이며, 수수료를
//! 무시하는 구 버전 동작은 `compute_gross`로 재현할 수 있습니다.
//!
//! 모든 연산은 Decimal 전체 정밀도로 수행하고, 원 단위 반올림은
//! 표시 경계에서만 합니다.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::fees::FeeSchedule;
use crate::error::{CalcError, CalcResult};
use crate::types::Market;

/// 수익 계산 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// 투자원금 (원)
    pub principal: Decimal,
    /// 수익률 (백분율, 예: 2 = 2%)
    pub return_rate_percent: Decimal,
    /// 매도금액 (원)
    pub sell_amount: Decimal,
    /// 매매가 체결되는 마켓
    pub market: Market,
    /// 출금 수수료 포함 여부
    pub include_withdrawal_fee: bool,
}

impl CalculationInput {
    /// 새 계산 입력을 생성합니다. 유효성 검사는 `compute` 시점에 수행됩니다.
    pub fn new(
        principal: Decimal,
        return_rate_percent: Decimal,
        sell_amount: Decimal,
        market: Market,
        include_withdrawal_fee: bool,
    ) -> Self {
        Self {
            principal,
            return_rate_percent,
            sell_amount,
            market,
            include_withdrawal_fee,
        }
    }

    /// f64 입력으로부터 계산 입력을 생성합니다.
    ///
    /// NaN/무한대는 Decimal로 표현할 수 없으므로 이 경계에서
    /// `InvalidInput`으로 보고됩니다.
    pub fn from_f64(
        principal: f64,
        return_rate_percent: f64,
        sell_amount: f64,
        market: Market,
        include_withdrawal_fee: bool,
    ) -> CalcResult<Self> {
        let principal = Decimal::from_f64(principal)
            .ok_or_else(|| CalcError::InvalidInput("투자원금이 유한한 숫자가 아닙니다".to_string()))?;
        let return_rate_percent = Decimal::from_f64(return_rate_percent)
            .ok_or_else(|| CalcError::InvalidInput("수익률이 유한한 숫자가 아닙니다".to_string()))?;
        let sell_amount = Decimal::from_f64(sell_amount)
            .ok_or_else(|| CalcError::InvalidInput("매도금액이 유한한 숫자가 아닙니다".to_string()))?;

        let input = Self::new(
            principal,
            return_rate_percent,
            sell_amount,
            market,
            include_withdrawal_fee,
        );
        input.validate()?;
        Ok(input)
    }

    /// 입력 값의 범위를 검사합니다.
    pub fn validate(&self) -> CalcResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(CalcError::InvalidInput(
                "투자원금은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.sell_amount <= Decimal::ZERO {
            return Err(CalcError::InvalidInput(
                "매도금액은 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

/// 수수료 반영 수익 계산 결과.
///
/// 불변식: `remaining_total == remaining_principal + remaining_profit`,
/// `total_fees == buy_fee + sell_fee + withdrawal_fee`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// 수익 반영 후 총 자산 가치
    pub total_value: Decimal,
    /// 전체 수익 (매수 수수료 차감 후 원금 기준)
    pub total_profit: Decimal,
    /// 매도 비율에 해당하는 실현 수익 (수수료 차감 전)
    pub actual_profit: Decimal,
    /// 수수료 차감 후 실현 수익
    pub actual_profit_after_fees: Decimal,
    /// 매도 비율 (백분율, 0~100)
    pub sell_ratio_percent: Decimal,
    /// 매도 후 남은 원금
    pub remaining_principal: Decimal,
    /// 매도 후 남은 수익
    pub remaining_profit: Decimal,
    /// 매도 후 남은 총 자산
    pub remaining_total: Decimal,
    /// 매수 수수료
    pub buy_fee: Decimal,
    /// 매도 수수료
    pub sell_fee: Decimal,
    /// 출금 수수료 (미포함 시 0)
    pub withdrawal_fee: Decimal,
    /// 수수료 합계
    pub total_fees: Decimal,
}

/// 수수료 미반영(구 버전) 수익 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrossCalculationResult {
    /// 수익 반영 후 총 자산 가치
    pub total_value: Decimal,
    /// 전체 수익
    pub total_profit: Decimal,
    /// 매도 비율에 해당하는 실현 수익
    pub actual_profit: Decimal,
    /// 매도 비율 (백분율, 0~100)
    pub sell_ratio_percent: Decimal,
    /// 매도 후 남은 원금
    pub remaining_principal: Decimal,
    /// 매도 후 남은 수익
    pub remaining_profit: Decimal,
    /// 매도 후 남은 총 자산
    pub remaining_total: Decimal,
}

/// 수수료를 반영한 분할매도 수익 계산 (표준 경로).
///
/// 매수 수수료를 차감한 순원금에 수익률을 적용하고, 매도금액을
/// 원금 몫과 수익 몫으로 분리하여 수수료 차감 후 실현 수익을 구합니다.
///
/// # Arguments
///
/// * `input` - 계산 입력 (원금, 수익률, 매도금액, 마켓, 출금 수수료 여부)
///
/// # Returns
///
/// 수수료 내역이 포함된 계산 결과
///
/// # Errors
///
/// * `InvalidInput` - 원금 또는 매도금액이 0 이하
/// * `DegenerateValue` - 자산 가치가 0 이하 (수익률 -100% 이하)
/// * `OverSell` - 매도금액이 총 자산 가치 초과
pub fn compute(input: &CalculationInput) -> CalcResult<CalculationResult> {
    input.validate()?;

    let fee_rate = FeeSchedule::fee_rate(input.market);

    // 1. 매수 수수료 차감
    let buy_fee = input.principal * fee_rate;
    let net_principal = input.principal - buy_fee;

    // 2. 수익 반영 후 총 자산 가치
    let growth = Decimal::ONE + input.return_rate_percent / dec!(100);
    let total_value = net_principal * growth;

    if total_value <= Decimal::ZERO {
        return Err(CalcError::DegenerateValue(total_value));
    }
    if input.sell_amount > total_value {
        return Err(CalcError::OverSell {
            sell_amount: input.sell_amount,
            total_value,
        });
    }

    // 3. 매도 비율 및 수수료
    let sell_ratio = input.sell_amount / total_value;
    let sell_fee = input.sell_amount * fee_rate;
    let withdrawal_fee = if input.include_withdrawal_fee {
        FeeSchedule::withdrawal_fee()
    } else {
        Decimal::ZERO
    };

    // 4. 수익 분해
    let total_profit = total_value - net_principal;
    let actual_profit = total_profit * sell_ratio;

    // 5. 매도금액을 원금 몫과 수익 몫으로 분리
    let sell_principal_ratio = (net_principal * sell_ratio) / input.sell_amount;
    let sell_profit_ratio = Decimal::ONE - sell_principal_ratio;
    let actual_profit_after_fees =
        input.sell_amount * sell_profit_ratio - sell_fee - withdrawal_fee;

    // 6. 매도 후 잔여 자산
    let remaining_principal = net_principal * (Decimal::ONE - sell_ratio);
    let remaining_profit = total_profit - actual_profit;
    let remaining_total = remaining_principal + remaining_profit;

    Ok(CalculationResult {
        total_value,
        total_profit,
        actual_profit,
        actual_profit_after_fees,
        sell_ratio_percent: sell_ratio * dec!(100),
        remaining_principal,
        remaining_profit,
        remaining_total,
        buy_fee,
        sell_fee,
        withdrawal_fee,
        total_fees: buy_fee + sell_fee + withdrawal_fee,
    })
}

/// 수수료를 반영하지 않는 구 버전 수익 계산.
///
/// 원금에 수익률을 그대로 적용하며 어떤 수수료도 차감하지 않습니다.
/// 유효성 검사와 초과 매도/자산 붕괴 규칙은 `compute`와 동일합니다.
pub fn compute_gross(input: &CalculationInput) -> CalcResult<GrossCalculationResult> {
    input.validate()?;

    let growth = Decimal::ONE + input.return_rate_percent / dec!(100);
    let total_value = input.principal * growth;

    if total_value <= Decimal::ZERO {
        return Err(CalcError::DegenerateValue(total_value));
    }
    if input.sell_amount > total_value {
        return Err(CalcError::OverSell {
            sell_amount: input.sell_amount,
            total_value,
        });
    }

    let sell_ratio = input.sell_amount / total_value;
    let total_profit = input.principal * (input.return_rate_percent / dec!(100));
    let actual_profit = total_profit * sell_ratio;
    let remaining_principal = input.principal - (input.sell_amount - actual_profit);
    let remaining_profit = total_profit - actual_profit;

    Ok(GrossCalculationResult {
        total_value,
        total_profit,
        actual_profit,
        sell_ratio_percent: sell_ratio * dec!(100),
        remaining_principal,
        remaining_profit,
        remaining_total: remaining_principal + remaining_profit,
    })
}
