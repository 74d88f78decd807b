//! 메모리 기반 KvStore 구현.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::kv::KvStore;

/// 메모리 기반 저장소.
///
/// 테스트와 세션 로컬 상태에 사용합니다. `clone`은 같은 저장 공간을
/// 공유합니다.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKv {
    /// 빈 저장소를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 키 개수를 반환합니다.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// 저장소가 비어 있는지 확인합니다.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_kv_roundtrip() {
        let kv = MemoryKv::new();
        assert_eq!(kv.get("missing").await.unwrap(), None);

        kv.set("a", "1").await.unwrap();
        assert_eq!(kv.get("a").await.unwrap(), Some("1".to_string()));

        kv.set("a", "2").await.unwrap();
        assert_eq!(kv.get("a").await.unwrap(), Some("2".to_string()));

        kv.remove("a").await.unwrap();
        assert_eq!(kv.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_kv_shared_clone() {
        let kv = MemoryKv::new();
        let other = kv.clone();

        kv.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(other.len().await, 1);
    }
}
