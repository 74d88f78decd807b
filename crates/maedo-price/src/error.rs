//! 시세 조회 에러 타입.

use thiserror::Error;

/// 시세 조회 관련 에러.
#[derive(Debug, Error)]
pub enum PriceError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 요청 한도 초과
    #[error("Rate limit exceeded")]
    RateLimited,

    /// API 에러 응답
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// 파싱/역직렬화 에러
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 알 수 없는 에러
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl PriceError {
    /// 재시도 가능한 에러인지 확인.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PriceError::NetworkError(_) | PriceError::RateLimited | PriceError::Timeout(_)
        )
    }
}

impl From<reqwest::Error> for PriceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PriceError::Timeout(err.to_string())
        } else if err.is_connect() {
            PriceError::NetworkError(err.to_string())
        } else {
            PriceError::Unknown(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PriceError {
    fn from(err: serde_json::Error) -> Self {
        PriceError::ParseError(err.to_string())
    }
}

/// 시세 조회 작업을 위한 Result 타입.
pub type PriceResult<T> = Result<T, PriceError>;
