//! 계산기 세션 상태 저장소.
//!
//! 입력값(원금, 수익률, 매도금액, 마켓, 출금 수수료 여부), 글자 크기
//! 환경설정, 최근 계산 결과를 각각 독립된 키로 저장합니다. 없거나
//! 손상된 값은 기본값으로 대체하며 오류로 보고하지 않습니다.

use maedo_core::{CalculationInput, CalculationResult, Market};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::kv::KvStore;

/// 세션 상태 키.
mod keys {
    pub const PRINCIPAL: &str = "calc:principal";
    pub const RETURN_RATE: &str = "calc:return_rate";
    pub const SELL_AMOUNT: &str = "calc:sell_amount";
    pub const MARKET: &str = "calc:market";
    pub const INCLUDE_WITHDRAWAL_FEE: &str = "calc:include_withdrawal_fee";
    pub const FONT_SIZE: &str = "calc:font_size";
    pub const LAST_RESULT: &str = "calc:last_result";
}

/// 글자 크기 환경설정 (픽셀 단위).
///
/// 2px 단위로 조절하며 12~24px 범위로 제한됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSize(u8);

impl FontSize {
    /// 최소 크기.
    pub const MIN: u8 = 12;
    /// 최대 크기.
    pub const MAX: u8 = 24;
    /// 조절 단위.
    pub const STEP: u8 = 2;

    /// 픽셀 값으로부터 생성합니다. 범위를 벗어나면 경계로 고정합니다.
    pub fn from_px(px: u8) -> Self {
        Self(px.clamp(Self::MIN, Self::MAX))
    }

    /// 픽셀 값을 반환합니다.
    pub fn px(self) -> u8 {
        self.0
    }

    /// 한 단계 키운 크기를 반환합니다.
    pub fn increased(self) -> Self {
        Self((self.0 + Self::STEP).min(Self::MAX))
    }

    /// 한 단계 줄인 크기를 반환합니다.
    pub fn decreased(self) -> Self {
        Self(self.0.saturating_sub(Self::STEP).max(Self::MIN))
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(16)
    }
}

/// KvStore 위에서 동작하는 세션 상태 저장소.
pub struct SessionStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> SessionStore<S> {
    /// 새 세션 저장소를 생성합니다.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 계산 입력을 필드별 키로 저장합니다.
    pub async fn save_input(&self, input: &CalculationInput) -> Result<()> {
        self.store
            .set(keys::PRINCIPAL, &input.principal.to_string())
            .await?;
        self.store
            .set(keys::RETURN_RATE, &input.return_rate_percent.to_string())
            .await?;
        self.store
            .set(keys::SELL_AMOUNT, &input.sell_amount.to_string())
            .await?;
        self.store.set(keys::MARKET, input.market.as_str()).await?;
        self.store
            .set(
                keys::INCLUDE_WITHDRAWAL_FEE,
                &input.include_withdrawal_fee.to_string(),
            )
            .await?;
        Ok(())
    }

    /// 저장된 계산 입력을 복원합니다.
    ///
    /// 숫자 필드 중 하나라도 없거나 손상된 경우 `None`을 반환합니다.
    /// 마켓과 출금 수수료 여부는 기본값(KRW 마켓, 미포함)으로 대체합니다.
    pub async fn load_input(&self) -> Option<CalculationInput> {
        let principal = self.load_decimal(keys::PRINCIPAL).await?;
        let return_rate_percent = self.load_decimal(keys::RETURN_RATE).await?;
        let sell_amount = self.load_decimal(keys::SELL_AMOUNT).await?;

        let market = match self.read(keys::MARKET).await {
            Some(s) => s.parse().unwrap_or(Market::Krw),
            None => Market::Krw,
        };
        let include_withdrawal_fee = match self.read(keys::INCLUDE_WITHDRAWAL_FEE).await {
            Some(s) => s.parse().unwrap_or(false),
            None => false,
        };

        Some(CalculationInput::new(
            principal,
            return_rate_percent,
            sell_amount,
            market,
            include_withdrawal_fee,
        ))
    }

    /// 저장된 입력 키를 모두 삭제합니다 (초기화).
    pub async fn clear_input(&self) -> Result<()> {
        self.store.remove(keys::PRINCIPAL).await?;
        self.store.remove(keys::RETURN_RATE).await?;
        self.store.remove(keys::SELL_AMOUNT).await?;
        self.store.remove(keys::MARKET).await?;
        self.store.remove(keys::INCLUDE_WITHDRAWAL_FEE).await?;
        Ok(())
    }

    /// 최근 계산 결과를 저장합니다.
    pub async fn save_last_result(&self, result: &CalculationResult) -> Result<()> {
        let json = serde_json::to_string(result)?;
        self.store.set(keys::LAST_RESULT, &json).await
    }

    /// 최근 계산 결과를 복원합니다. 없거나 손상된 경우 `None`.
    pub async fn load_last_result(&self) -> Option<CalculationResult> {
        let json = self.read(keys::LAST_RESULT).await?;
        match serde_json::from_str(&json) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("최근 결과 역직렬화 실패: {}", e);
                None
            }
        }
    }

    /// 글자 크기 환경설정을 저장합니다.
    pub async fn save_font_size(&self, size: FontSize) -> Result<()> {
        self.store
            .set(keys::FONT_SIZE, &size.px().to_string())
            .await
    }

    /// 글자 크기 환경설정을 복원합니다. 없거나 손상된 경우 기본값.
    pub async fn load_font_size(&self) -> FontSize {
        match self.read(keys::FONT_SIZE).await {
            Some(s) => s
                .parse::<u8>()
                .map(FontSize::from_px)
                .unwrap_or_default(),
            None => FontSize::default(),
        }
    }

    /// 읽기 실패를 `None`으로 흡수하는 조회 헬퍼.
    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, "세션 값 읽기 실패: {}", e);
                None
            }
        }
    }

    async fn load_decimal(&self, key: &str) -> Option<Decimal> {
        let raw = self.read(key).await?;
        match raw.parse::<Decimal>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, "세션 값 파싱 실패: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;
    use maedo_core::compute;
    use rust_decimal_macros::dec;

    fn sample_input() -> CalculationInput {
        CalculationInput::new(dec!(54000000), dec!(2), dec!(10000000), Market::Usdt, true)
    }

    #[tokio::test]
    async fn test_input_roundtrip() {
        let session = SessionStore::new(MemoryKv::new());

        session.save_input(&sample_input()).await.unwrap();
        let loaded = session.load_input().await.unwrap();
        assert_eq!(loaded, sample_input());
    }

    #[tokio::test]
    async fn test_load_input_missing() {
        let session = SessionStore::new(MemoryKv::new());
        assert!(session.load_input().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_market_falls_back() {
        let kv = MemoryKv::new();
        let session = SessionStore::new(kv.clone());
        session.save_input(&sample_input()).await.unwrap();

        kv.set("calc:market", "doge").await.unwrap();
        let loaded = session.load_input().await.unwrap();
        assert_eq!(loaded.market, Market::Krw);
    }

    #[tokio::test]
    async fn test_clear_input() {
        let session = SessionStore::new(MemoryKv::new());
        session.save_input(&sample_input()).await.unwrap();

        session.clear_input().await.unwrap();
        assert!(session.load_input().await.is_none());
    }

    #[tokio::test]
    async fn test_last_result_roundtrip() {
        let session = SessionStore::new(MemoryKv::new());
        let result = compute(&sample_input()).unwrap();

        session.save_last_result(&result).await.unwrap();
        assert_eq!(session.load_last_result().await.unwrap(), result);
    }

    #[tokio::test]
    async fn test_corrupt_last_result() {
        let kv = MemoryKv::new();
        kv.set("calc:last_result", "???").await.unwrap();

        let session = SessionStore::new(kv);
        assert!(session.load_last_result().await.is_none());
    }

    #[tokio::test]
    async fn test_font_size_preference() {
        let session = SessionStore::new(MemoryKv::new());
        assert_eq!(session.load_font_size().await, FontSize::default());

        let larger = FontSize::default().increased();
        session.save_font_size(larger).await.unwrap();
        assert_eq!(session.load_font_size().await.px(), 18);
    }

    #[test]
    fn test_font_size_clamping() {
        let mut size = FontSize::default();
        for _ in 0..10 {
            size = size.increased();
        }
        assert_eq!(size.px(), FontSize::MAX);

        for _ in 0..10 {
            size = size.decreased();
        }
        assert_eq!(size.px(), FontSize::MIN);
    }

    #[test]
    fn test_font_size_from_px_clamps() {
        assert_eq!(FontSize::from_px(8).px(), 12);
        assert_eq!(FontSize::from_px(30).px(), 24);
        assert_eq!(FontSize::from_px(20).px(), 20);
    }
}
