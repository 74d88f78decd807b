//! KvStore 저장소 구현.

pub mod memory;
pub mod redis;

pub use memory::MemoryKv;
pub use redis::{RedisConfig, RedisKv};
