//! 与键值存储同步的状态单元
//!
//! 内存中的值是本次会话的唯一事实来源，存储只是尽力而为的落盘目标：
//! 读失败回退到默认值，写失败只记日志，内存值照常更新。

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::StoreError;
use crate::storage::KeyValueStore;

/// 读取并解析 `key`，缺失、为空或解析失败时返回 `default`
pub fn read<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match store.get_item(key) {
        Ok(Some(raw)) if !raw.is_empty() => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored value is malformed, using default");
                default
            }
        },
        Ok(_) => default,
        Err(e) => {
            warn!(key, error = %e, "storage read failed, using default");
            default
        }
    }
}

/// 序列化并写入 `key`，失败只记日志
pub fn write<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(StoreError::from)
        .and_then(|raw| store.set_item(key, &raw));
    if let Err(e) = result {
        warn!(key, error = %e, "storage write failed, value kept in memory only");
    }
}

/// 绑定单个存储键的类型化值
#[derive(Debug, Clone)]
pub struct SyncedCell<T> {
    key: String,
    value: T,
    default: T,
}

impl<T> SyncedCell<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn load(store: &dyn KeyValueStore, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = read(store, &key, default.clone());
        Self {
            key,
            value,
            default,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set(&mut self, store: &mut dyn KeyValueStore, value: T) {
        self.value = value;
        write(store, &self.key, &self.value);
    }

    /// 原地修改当前值，然后写回
    pub fn update(&mut self, store: &mut dyn KeyValueStore, updater: impl FnOnce(&mut T)) {
        updater(&mut self.value);
        write(store, &self.key, &self.value);
    }

    /// 切换到新的键并重新读取，未写入的内存修改被丢弃
    #[allow(dead_code)]
    pub fn rekey(&mut self, store: &dyn KeyValueStore, key: impl Into<String>) {
        self.key = key.into();
        self.value = read(store, &self.key, self.default.clone());
    }
}
