mod config;
mod error;
mod logging;
mod models;
mod repository;
mod storage;
mod synced;
mod ui;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::ui::{App, render};

/// 创建数据目录并初始化日志
///
/// 两者失败都不致命：返回 `None` 时本次会话只在内存中运行。
fn prepare_data_dir(config: &Config) -> Option<PathBuf> {
    let prepared = config.resolve_data_dir().and_then(|dir| {
        fs::create_dir_all(&dir)?;
        Ok(dir)
    });

    let data_dir = match prepared {
        Ok(dir) => dir,
        Err(e) => {
            logging::init_discard_logging(&config.log_level);
            warn!(error = %e, "data directory unavailable");
            return None;
        }
    };

    if let Err(e) = logging::init_logging(&data_dir, &config.log_level) {
        logging::init_discard_logging(&config.log_level);
        warn!(error = %e, "log file unavailable");
    }
    Some(data_dir)
}

/// 打开数据目录下的存储；不可用时退化为仅内存
fn open_store(data_dir: Option<&Path>, quota: Option<u64>) -> Box<dyn KeyValueStore> {
    let opened = match data_dir {
        Some(dir) => FileStore::open(dir.join("storage"), quota),
        None => Err(io::Error::new(io::ErrorKind::NotFound, "no data directory")),
    };

    match opened {
        Ok(store) => {
            debug!(root = %store.root().display(), "opened file store");
            Box::new(store)
        }
        Err(e) => {
            warn!(error = %e, "storage unavailable, changes will not persist");
            Box::new(match quota {
                Some(quota) => MemoryStore::with_quota(quota),
                None => MemoryStore::new(),
            })
        }
    }
}

fn main() -> Result<()> {
    let config = Config::load()?;
    let data_dir = prepare_data_dir(&config);
    if config.is_debug() {
        debug!(?config, ?data_dir, "effective configuration");
    }

    // 创建应用状态
    let store = open_store(data_dir.as_deref(), config.quota());
    let mut app = App::new(store, config.default_theme);
    info!(questions = app.questions.len(), "session started");

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("session ended");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press && ui::handle_key_event(app, key) {
                break;
            }
        }
    }
    Ok(())
}
