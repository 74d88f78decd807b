//! 문자열 키-값 저장소 포트.
//!
//! 계산기 상태는 전부 문자열 키-값 쌍으로 저장됩니다. 히스토리와
//! 세션 저장소는 이 포트만 사용하므로 플랫폼 저장소 없이 테스트할
//! 수 있습니다.

use async_trait::async_trait;

use crate::error::Result;

/// 문자열 키-값 저장소 인터페이스.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// 키의 값을 조회합니다. 없으면 `None`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// 키에 값을 저장합니다.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// 키를 삭제합니다.
    async fn remove(&self, key: &str) -> Result<()>;
}
