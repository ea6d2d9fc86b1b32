//! 配置加载
//!
//! 优先级（高到低）：环境变量 `QHUB_*`、`~/.config/qhub/config.toml`、默认值。

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::Theme;
use crate::storage::DEFAULT_QUOTA_BYTES;

const APP_DIR_NAME: &str = "qhub";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_DATA_DIR: &str = "QHUB_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "QHUB_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 数据目录，默认 `~/.local/share/qhub`
    pub data_dir: Option<PathBuf>,
    /// `debug` 时输出诊断信息
    pub log_level: String,
    /// 0 表示不限
    pub storage_quota_bytes: u64,
    pub default_theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "info".to_string(),
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
            default_theme: Theme::Light,
        }
    }
}

impl Config {
    /// 从默认位置加载并应用环境变量覆盖
    pub fn load() -> Result<Self> {
        let mut config = match dirs::config_dir() {
            Some(dir) => Self::from_file(&dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// 文件不存在时返回默认配置
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
    }

    pub fn is_debug(&self) -> bool {
        self.log_level.eq_ignore_ascii_case("debug")
    }

    pub fn quota(&self) -> Option<u64> {
        (self.storage_quota_bytes > 0).then_some(self.storage_quota_bytes)
    }

    /// 解析数据目录（不创建）
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| AppError::Config("cannot determine user data directory".to_string()))
    }
}
