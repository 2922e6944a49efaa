//! 对象缓存
//!
//! 以字符串形式存放序列化后的对象，登录会话保存在这里（键为 `session:{token}`）。

pub mod object_cache;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

pub use object_cache::moka::MokaCacheWrapper;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String);
    async fn remove(&self, key: &str);
}

impl dyn ObjectCache {
    /// 读取并反序列化；值无法解析时返回 `ExistsButNoValue`
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    tracing::warn!("缓存值反序列化失败，键: {}, 错误: {}", key, e);
                    CacheResult::ExistsButNoValue
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    pub async fn insert<T: Serialize + Sync>(&self, key: String, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw).await,
            Err(e) => tracing::error!("缓存值序列化失败，键: {}, 错误: {}", key, e),
        }
    }
}

/// 登录会话在缓存中的键
pub fn session_key(token: &str) -> String {
    format!("session:{token}")
}
