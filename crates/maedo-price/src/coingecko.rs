//! CoinGecko 시세 클라이언트.
//!
//! simple/price 엔드포인트로 비트코인 원화 시세를 조회합니다.
//! 인증이 필요 없는 공개 API만 사용합니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use maedo_core::PriceConfig;

use crate::error::{PriceError, PriceResult};
use crate::provider::{PriceProvider, PriceQuote};

/// CoinGecko 클라이언트 설정.
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    /// API 기본 URL
    pub base_url: String,
    /// 조회할 코인 id
    pub coin_id: String,
    /// 표시 통화
    pub vs_currency: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com".to_string(),
            coin_id: "bitcoin".to_string(),
            vs_currency: "krw".to_string(),
            timeout_secs: 10,
        }
    }
}

impl From<&PriceConfig> for CoinGeckoConfig {
    fn from(config: &PriceConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            ..Default::default()
        }
    }
}

/// simple/price 응답의 코인별 항목.
#[derive(Debug, Deserialize)]
struct CoinEntry {
    /// 통화별 가격 (예: "krw" -> 163250000)
    #[serde(flatten)]
    prices: HashMap<String, Decimal>,
    /// 마지막 갱신 시각 (unix epoch 초)
    last_updated_at: Option<i64>,
}

/// CoinGecko REST 클라이언트.
pub struct CoinGeckoClient {
    config: CoinGeckoConfig,
    client: Client,
}

impl CoinGeckoClient {
    /// 새 클라이언트를 생성합니다.
    pub fn new(config: CoinGeckoConfig) -> PriceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// 애플리케이션 시세 설정으로 클라이언트를 생성합니다.
    pub fn from_app_config(config: &PriceConfig) -> PriceResult<Self> {
        Self::new(CoinGeckoConfig::from(config))
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoClient {
    fn name(&self) -> &str {
        "coingecko"
    }

    async fn fetch_price(&self) -> PriceResult<PriceQuote> {
        let url = format!("{}/api/v3/simple/price", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("ids", self.config.coin_id.as_str()),
                ("vs_currencies", self.config.vs_currency.as_str()),
                ("include_last_updated_at", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(PriceError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PriceError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: HashMap<String, CoinEntry> = serde_json::from_str(&body)?;

        let entry = parsed.get(&self.config.coin_id).ok_or_else(|| {
            PriceError::ParseError(format!("coin not in response: {}", self.config.coin_id))
        })?;
        let price = entry
            .prices
            .get(&self.config.vs_currency)
            .copied()
            .ok_or_else(|| {
                PriceError::ParseError(format!(
                    "currency not in response: {}",
                    self.config.vs_currency
                ))
            })?;

        let last_updated = entry
            .last_updated_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(Utc::now);

        debug!(%price, %last_updated, "시세 조회 완료");

        Ok(PriceQuote {
            price,
            last_updated,
        })
    }
}
