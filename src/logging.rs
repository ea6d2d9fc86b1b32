//! 日志初始化
//!
//! 终端被 TUI 占用，日志写入数据目录下的 `qhub.log`。

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_FILE_NAME: &str = "qhub.log";

/// `RUST_LOG` 优先于配置中的级别
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| configured_filter(level))
}

/// 配置级别对应的过滤器，无效级别回退到 info
fn configured_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("qhub={level}")).unwrap_or_else(|_| EnvFilter::new("qhub=info"))
}

/// 初始化日志，重复调用时忽略
pub fn init_logging(data_dir: &Path, level: &str) -> io::Result<()> {
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE_NAME))?;

    let subscriber = tracing_subscriber::registry().with(filter_for(level)).with(
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true),
    );

    let _ = subscriber.try_init();
    Ok(())
}

/// 没有可写的日志文件时使用：事件被丢弃，终端不受干扰
pub fn init_discard_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(io::sink)
        .try_init();
}

#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        init_logging(dir.path(), "debug").unwrap();
        assert!(dir.path().join(LOG_FILE_NAME).exists());
    }

    #[test]
    fn test_configured_filter() {
        assert_eq!(configured_filter("debug").to_string(), "qhub=debug");
        assert_eq!(configured_filter("not a level !!").to_string(), "qhub=info");
    }
}
