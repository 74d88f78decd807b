//! 계산 히스토리 저장소.
//!
//! 최근 계산 결과를 최신순으로 최대 10건 보관합니다. 저장 값이 없거나
//! 손상된 경우 빈 목록으로 초기화하며, 읽기 실패는 호출자에게 오류로
//! 전파하지 않습니다.

use maedo_core::HistoryEntry;
use tracing::warn;

use crate::error::Result;
use crate::kv::KvStore;

/// 히스토리 최대 보관 건수. 초과분은 오래된 항목부터 제거됩니다.
pub const MAX_ENTRIES: usize = 10;

/// 기본 저장 키.
const DEFAULT_KEY: &str = "calc:history";

/// KvStore 위에서 동작하는 계산 히스토리 저장소.
pub struct HistoryStore<S: KvStore> {
    store: S,
    key: String,
}

impl<S: KvStore> HistoryStore<S> {
    /// 기본 키로 히스토리 저장소를 생성합니다.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_KEY)
    }

    /// 지정한 키로 히스토리 저장소를 생성합니다.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// 히스토리 목록을 반환합니다 (최신순).
    ///
    /// 저장 값이 없거나 손상된 경우, 또는 읽기에 실패한 경우 빈 목록을
    /// 반환합니다.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        let json = match self.store.get(&self.key).await {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("히스토리 읽기 실패, 빈 목록으로 대체: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&json) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("히스토리 역직렬화 실패, 빈 목록으로 초기화: {}", e);
                Vec::new()
            }
        }
    }

    /// 항목을 맨 앞에 추가하고 최대 건수로 잘라냅니다.
    pub async fn add(&self, entry: &HistoryEntry) -> Result<()> {
        let mut entries = self.list().await;
        entries.insert(0, entry.clone());
        entries.truncate(MAX_ENTRIES);
        self.save(&entries).await
    }

    /// id가 일치하는 항목을 삭제합니다.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let mut entries = self.list().await;
        entries.retain(|e| e.id != id);
        self.save(&entries).await
    }

    /// 히스토리 전체와 저장 값을 삭제합니다.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(&self.key).await
    }

    async fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.store.set(&self.key, &json).await
    }
}
