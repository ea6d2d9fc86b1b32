//! 问题仓库与主题设置
//!
//! 两者都是 `SyncedCell` 的具体实例，只通过命名操作修改，
//! 持久化格式集中在这里。

use chrono::{SubsecRound, Utc};
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::models::{QuestionRecord, Theme};
use crate::storage::KeyValueStore;
use crate::synced::SyncedCell;

pub const QUESTIONS_KEY: &str = "questions";
pub const THEME_KEY: &str = "theme";

/// 问答记录集合，只增不改
#[derive(Debug, Clone)]
pub struct QuestionRepository {
    cell: SyncedCell<Vec<QuestionRecord>>,
}

impl QuestionRepository {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let cell = SyncedCell::load(store, QUESTIONS_KEY, Vec::new());
        debug!(key = cell.key(), count = cell.get().len(), "loaded questions");
        Self { cell }
    }

    /// 添加记录并写回存储
    ///
    /// 时间戳截断到毫秒（与存储格式一致），且不早于已有的最新记录，
    /// 时钟回拨时仍保持最新在前。
    pub fn add(
        &mut self,
        store: &mut dyn KeyValueStore,
        question: &str,
        answer: &str,
    ) -> Result<QuestionRecord, ValidationError> {
        let newest = self.cell.get().iter().map(|r| r.created_at).max();
        let now = Utc::now().trunc_subsecs(3);
        let created_at = newest.map_or(now, |newest| newest.max(now));

        let record = QuestionRecord::new(question, answer, created_at)?;
        self.cell
            .update(store, |records| records.insert(0, record.clone()));

        info!(id = %record.id, total = self.len(), "question added");
        Ok(record)
    }

    /// 按创建时间倒序（稳定排序）
    pub fn list(&self) -> Vec<&QuestionRecord> {
        let mut sorted: Vec<&QuestionRecord> = self.cell.get().iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }

    pub fn get(&self, id: &str) -> Option<&QuestionRecord> {
        self.cell.get().iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.cell.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell.get().is_empty()
    }
}

/// 全局主题设置：一个读取接口，一个写入接口
#[derive(Debug, Clone)]
pub struct ThemeSetting {
    cell: SyncedCell<Theme>,
}

impl ThemeSetting {
    pub fn load(store: &dyn KeyValueStore, default: Theme) -> Self {
        Self {
            cell: SyncedCell::load(store, THEME_KEY, default),
        }
    }

    pub fn current(&self) -> Theme {
        *self.cell.get()
    }

    pub fn set(&mut self, store: &mut dyn KeyValueStore, theme: Theme) {
        self.cell.set(store, theme);
    }

    pub fn toggle(&mut self, store: &mut dyn KeyValueStore) -> Theme {
        let next = self.current().toggled();
        self.set(store, next);
        next
    }
}
