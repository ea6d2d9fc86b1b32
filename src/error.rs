//! 错误类型定义
//!
//! 存储错误在 `SyncedCell` 内部被吞掉，只有启动阶段的错误会冒泡到 `main`。

use thiserror::Error;

/// 键值存储错误
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage quota exceeded: need {needed} bytes, quota is {quota} bytes")]
    QuotaExceeded { needed: u64, quota: u64 },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// 表单校验错误（不是异常，只用于提示用户）
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("question is required")]
    EmptyQuestion,

    #[error("answer is required")]
    EmptyAnswer,
}

/// 应用级错误
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_quota_message() {
        let err = StoreError::QuotaExceeded {
            needed: 12,
            quota: 10,
        };
        assert_eq!(
            err.to_string(),
            "storage quota exceeded: need 12 bytes, quota is 10 bytes"
        );
    }

    #[test]
    fn test_store_error_wraps_into_app_error() {
        let app_err: AppError = StoreError::InvalidKey("../x".to_string()).into();
        assert!(matches!(app_err, AppError::Store(StoreError::InvalidKey(_))));
    }
}
