//! 持久化键值存储
//!
//! 字符串键 -> 字符串值，同步读写。`FileStore` 每个键一个文件，
//! `MemoryStore` 仅存在于本次会话中。

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;

/// 浏览器存储的默认配额 (5 MiB)
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// 同步的字符串键值存储
pub trait KeyValueStore {
    /// 读取键对应的原始字符串，键不存在时返回 `None`
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// 写入键值，覆盖旧值
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// `quota` 为 `None` 表示不限
fn check_quota(quota: Option<u64>, others: u64, value: &str) -> Result<(), StoreError> {
    if let Some(quota) = quota {
        let needed = others + value.len() as u64;
        if needed > quota {
            return Err(StoreError::QuotaExceeded { needed, quota });
        }
    }
    Ok(())
}

/// 基于目录的存储：`<root>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    quota: Option<u64>,
}

impl FileStore {
    /// 打开（必要时创建）存储目录
    pub fn open(root: impl Into<PathBuf>, quota: Option<u64>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root, quota })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// 除 `key` 之外所有值占用的字节数
    fn usage_excluding(&self, key: &str) -> io::Result<u64> {
        let skip = self.path_for(key);
        let mut total = 0;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if path == skip || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            total += entry.metadata()?.len();
        }
        Ok(total)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        if self.quota.is_some() {
            check_quota(self.quota, self.usage_excluding(key)?, value)?;
        }

        let path = self.path_for(key);
        let tmp = self.root.join(format!(".{key}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }
}

/// 内存存储，进程退出即丢失
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    quota: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: u64) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let others: u64 = self
            .items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len() as u64)
            .sum();
        check_quota(self.quota, others, value)?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
