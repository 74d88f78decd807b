//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 참조 시세 조회 설정
    #[serde(default)]
    pub price: PriceConfig,
    /// 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 참조 시세 조회 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PriceConfig {
    /// 시세 API 기본 URL
    pub api_base_url: String,
    /// 자동 갱신 주기 (초)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_refresh_interval() -> u64 {
    30
}
fn default_request_timeout() -> u64 {
    10
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.coingecko.com".to_string(),
            refresh_interval_secs: default_refresh_interval(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// 저장소 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Redis URL (미설정 시 메모리 저장소 사용)
    #[serde(default)]
    pub redis_url: Option<String>,
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("MAEDO")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.price.refresh_interval_secs, 30);
        assert_eq!(config.price.request_timeout_secs, 10);
        assert!(config.storage.redis_url.is_none());
    }

    #[test]
    fn test_partial_toml_uses_field_defaults() {
        let toml = r#"
            [price]
            api_base_url = "http://localhost:9000"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.price.api_base_url, "http://localhost:9000");
        assert_eq!(config.price.refresh_interval_secs, 30);
        assert_eq!(config.logging.format, "pretty");
    }
}
