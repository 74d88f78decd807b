//! 시세 제공자 trait 정의.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PriceResult;

/// 참조 시세.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// 현재 가격 (원)
    pub price: Decimal,
    /// 마지막 갱신 시각
    pub last_updated: DateTime<Utc>,
}

/// 시세 제공자 인터페이스.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// 제공자 이름 반환.
    fn name(&self) -> &str;

    /// 현재 시세 조회.
    async fn fetch_price(&self) -> PriceResult<PriceQuote>;
}
