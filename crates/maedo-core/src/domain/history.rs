//! 계산 히스토리 항목.
//!
//! 성공한 계산마다 입력과 결과의 스냅샷을 생성 시각과 함께 보관합니다.
//! 항목은 생성 이후 불변입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::profit::{CalculationInput, CalculationResult};

/// 한 번의 계산에 대한 히스토리 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 생성 시각에서 유도된 고유 식별자 (밀리초 epoch 문자열)
    pub id: String,
    /// 생성 시각
    pub timestamp: DateTime<Utc>,
    /// 계산 입력 스냅샷
    pub input: CalculationInput,
    /// 계산 결과 스냅샷
    pub result: CalculationResult,
}

impl HistoryEntry {
    /// 지정한 시각으로 히스토리 항목을 생성합니다.
    pub fn new(
        input: CalculationInput,
        result: CalculationResult,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: timestamp.timestamp_millis().to_string(),
            timestamp,
            input,
            result,
        }
    }

    /// 현재 시각으로 히스토리 항목을 생성합니다.
    pub fn now(input: CalculationInput, result: CalculationResult) -> Self {
        Self::new(input, result, Utc::now())
    }
}
