//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use tracing::debug;

use super::actions::Action;
use super::state::{App, Draft, InputField, ViewState};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::StartAddQuestion => self.start_add_question(),
            Action::ViewAnswer => self.view_answer(),
            Action::ToggleTheme => self.toggle_theme(),

            Action::Cancel => self.cancel(),
            Action::Submit => self.submit(),

            Action::SwitchField => {
                if let ViewState::Adding(draft) = &mut self.view {
                    draft.field = draft.field.other();
                }
            }

            Action::Input(c) => {
                if let ViewState::Adding(draft) = &mut self.view {
                    draft.buffer_mut().push(c);
                }
            }

            Action::DeleteChar => {
                if let ViewState::Adding(draft) = &mut self.view {
                    draft.buffer_mut().pop();
                }
            }
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.display_list.len() {
            self.selected_index += 1;
        }
    }

    // ============ 添加问题相关 ============

    /// 打开添加对话框，草稿总是从空白开始
    pub fn start_add_question(&mut self) {
        if self.view == ViewState::Idle {
            self.view = ViewState::Adding(Draft::default());
        }
    }

    fn submit(&mut self) {
        let ViewState::Adding(draft) = &mut self.view else {
            return;
        };

        if draft.field == InputField::Question {
            draft.field = InputField::Answer;
            return;
        }

        self.save_draft();
    }

    /// 保存草稿；任一字段为空时停留在对话框并显示提示
    pub fn save_draft(&mut self) {
        let ViewState::Adding(draft) = &mut self.view else {
            return;
        };

        draft.touched = true;
        if !draft.can_save() {
            debug!("save rejected, required field empty");
            return;
        }

        let (question, answer) = (draft.question.clone(), draft.answer.clone());
        match self.questions.add(self.store.as_mut(), &question, &answer) {
            Ok(record) => {
                self.refresh_display_list();
                self.selected_index = self
                    .display_list
                    .iter()
                    .position(|id| *id == record.id)
                    .unwrap_or(0);
                self.view = ViewState::Idle;
                self.message = Some("Question added".to_string());
            }
            Err(e) => {
                self.message = Some(e.to_string());
            }
        }
    }

    // ============ 查看答案相关 ============

    pub fn view_answer(&mut self) {
        if self.view != ViewState::Idle {
            return;
        }
        if let Some(record) = self.selected_record() {
            self.view = ViewState::Viewing(record.clone());
        }
    }

    // ============ 主题相关 ============

    pub fn toggle_theme(&mut self) {
        let theme = self.theme.toggle(self.store.as_mut());
        self.message = Some(format!("{} theme", theme.label()));
    }

    // ============ 通用操作 ============

    /// 关闭当前弹窗
    pub fn cancel(&mut self) {
        self.view = ViewState::Idle;
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;
    use crate::repository::THEME_KEY;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn new_app() -> App {
        crate::logging::init_test_logging();
        App::new(Box::new(MemoryStore::new()), Theme::Light)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch(Action::Input(c));
        }
    }

    fn add_question(app: &mut App, question: &str, answer: &str) {
        app.dispatch(Action::StartAddQuestion);
        type_text(app, question);
        app.dispatch(Action::Submit);
        type_text(app, answer);
        app.dispatch(Action::Submit);
    }

    #[test]
    fn test_add_flow() {
        let mut app = new_app();
        add_question(&mut app, "What is React?", "A library for building UIs.");

        assert_eq!(app.view, ViewState::Idle);
        assert_eq!(app.display_list.len(), 1);
        let record = app.selected_record().unwrap();
        assert_eq!(record.question, "What is React?");
        assert_eq!(record.answer, "A library for building UIs.");
        assert_eq!(app.message.as_deref(), Some("Question added"));
    }

    #[test]
    fn test_save_with_empty_field_stays_in_dialog() {
        let mut app = new_app();
        app.dispatch(Action::StartAddQuestion);
        app.dispatch(Action::SwitchField);
        type_text(&mut app, "x");
        app.dispatch(Action::Submit);

        match &app.view {
            ViewState::Adding(draft) => {
                assert!(draft.show_validation());
                assert!(draft.question_invalid());
                assert!(!draft.answer_invalid());
            }
            other => panic!("expected Adding, got {other:?}"),
        }
        assert!(app.questions.is_empty());
    }

    #[test]
    fn test_whitespace_only_is_rejected() {
        let mut app = new_app();
        add_question(&mut app, "   ", "  ");
        assert!(matches!(app.view, ViewState::Adding(_)));
        assert!(app.questions.is_empty());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut app = new_app();
        app.dispatch(Action::StartAddQuestion);
        type_text(&mut app, "half written");
        app.dispatch(Action::Cancel);
        assert_eq!(app.view, ViewState::Idle);

        app.dispatch(Action::StartAddQuestion);
        assert_eq!(app.view, ViewState::Adding(Draft::default()));
    }

    #[test]
    fn test_backspace_and_field_switch() {
        let mut app = new_app();
        app.dispatch(Action::StartAddQuestion);
        type_text(&mut app, "abc");
        app.dispatch(Action::DeleteChar);
        app.dispatch(Action::SwitchField);
        type_text(&mut app, "z");
        app.dispatch(Action::SwitchField);
        type_text(&mut app, "d");

        let ViewState::Adding(draft) = &app.view else {
            panic!("expected Adding");
        };
        assert_eq!(draft.question, "abd");
        assert_eq!(draft.answer, "z");
    }

    #[test]
    fn test_view_and_close() {
        let mut app = new_app();
        // 没有记录时无法查看
        app.dispatch(Action::ViewAnswer);
        assert_eq!(app.view, ViewState::Idle);

        add_question(&mut app, "q", "a");
        app.dispatch(Action::ViewAnswer);
        let ViewState::Viewing(record) = &app.view else {
            panic!("expected Viewing");
        };
        assert_eq!(record.answer, "a");

        // 查看时不能同时打开添加对话框
        app.dispatch(Action::StartAddQuestion);
        assert!(matches!(app.view, ViewState::Viewing(_)));

        app.dispatch(Action::Cancel);
        assert_eq!(app.view, ViewState::Idle);
    }

    #[test]
    fn test_new_question_selected_at_top() {
        let mut app = new_app();
        add_question(&mut app, "first", "1");
        add_question(&mut app, "second", "2");
        add_question(&mut app, "third", "3");

        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_record().unwrap().question, "third");

        app.dispatch(Action::MoveSelectionDown);
        app.dispatch(Action::MoveSelectionDown);
        app.dispatch(Action::MoveSelectionDown);
        assert_eq!(app.selected_record().unwrap().question, "first");
        app.dispatch(Action::MoveSelectionUp);
        assert_eq!(app.selected_record().unwrap().question, "second");
    }

    #[test]
    fn test_toggle_theme_persists() {
        let mut app = new_app();
        app.dispatch(Action::ToggleTheme);
        assert_eq!(app.current_theme(), Theme::Dark);
        assert_eq!(
            app.store.get_item(THEME_KEY).unwrap().as_deref(),
            Some("\"dark\"")
        );
        app.dispatch(Action::ToggleTheme);
        assert_eq!(app.current_theme(), Theme::Light);
    }

    #[test]
    fn test_state_survives_restart() {
        let mut app = new_app();
        add_question(&mut app, "kept?", "yes");
        app.dispatch(Action::ToggleTheme);

        let App { store, .. } = app;
        let reopened = App::new(store, Theme::Light);
        assert_eq!(reopened.current_theme(), Theme::Dark);
        assert_eq!(reopened.selected_record().unwrap().question, "kept?");
    }

    #[test]
    fn test_quit_signals_exit() {
        let mut app = new_app();
        assert!(app.dispatch(Action::Quit));
        assert!(!app.dispatch(Action::Cancel));
    }
}
