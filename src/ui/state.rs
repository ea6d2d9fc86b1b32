//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::models::{QuestionRecord, Theme};
use crate::repository::{QuestionRepository, ThemeSetting};
use crate::storage::KeyValueStore;

/// 应用状态
pub struct App {
    pub store: Box<dyn KeyValueStore>,
    pub questions: QuestionRepository,
    pub theme: ThemeSetting,
    pub selected_index: usize,
    pub display_list: Vec<String>, // 按创建时间倒序的记录 ID
    pub view: ViewState,
    pub message: Option<String>,
}

/// 弹窗状态，同一时刻最多一个
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Adding(Draft),
    Viewing(QuestionRecord),
}

/// 输入字段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputField {
    #[default]
    Question,
    Answer,
}

impl InputField {
    pub fn other(self) -> Self {
        match self {
            InputField::Question => InputField::Answer,
            InputField::Answer => InputField::Question,
        }
    }
}

/// 添加对话框中的草稿，关闭即丢弃
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub question: String,
    pub answer: String,
    pub field: InputField,
    pub touched: bool, // 尝试过保存
}

impl Draft {
    pub fn buffer_mut(&mut self) -> &mut String {
        match self.field {
            InputField::Question => &mut self.question,
            InputField::Answer => &mut self.answer,
        }
    }

    pub fn question_invalid(&self) -> bool {
        self.touched && self.question.trim().is_empty()
    }

    pub fn answer_invalid(&self) -> bool {
        self.touched && self.answer.trim().is_empty()
    }

    pub fn can_save(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }

    /// 是否显示校验提示
    pub fn show_validation(&self) -> bool {
        self.touched && !self.can_save()
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(store: Box<dyn KeyValueStore>, default_theme: Theme) -> Self {
        let questions = QuestionRepository::load(store.as_ref());
        let theme = ThemeSetting::load(store.as_ref(), default_theme);
        let mut app = Self {
            store,
            questions,
            theme,
            selected_index: 0,
            display_list: Vec::new(),
            view: ViewState::Idle,
            message: None,
        };
        app.refresh_display_list();
        app
    }

    /// 刷新显示列表
    pub fn refresh_display_list(&mut self) {
        self.display_list = self
            .questions
            .list()
            .iter()
            .map(|record| record.id.clone())
            .collect();

        // 确保选中索引有效
        if self.display_list.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.display_list.len() {
            self.selected_index = self.display_list.len() - 1;
        }
    }

    /// 获取当前选中的记录
    pub fn selected_record(&self) -> Option<&QuestionRecord> {
        self.display_list
            .get(self.selected_index)
            .and_then(|id| self.questions.get(id))
    }

    pub fn current_theme(&self) -> Theme {
        self.theme.current()
    }
}
