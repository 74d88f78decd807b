//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 저장소 연결 오류
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// 저장소 작업 오류
    #[error("Store error: {0}")]
    StoreError(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 타임아웃 오류
    #[error("Operation timeout: {0}")]
    Timeout(String),
}

impl From<redis::RedisError> for DataError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_connection_refusal() || err.is_connection_dropped() {
            DataError::ConnectionError(err.to_string())
        } else {
            DataError::StoreError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
