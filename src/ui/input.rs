//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::Action;
use super::state::{App, InputField, ViewState};

/// 答案字段中插入换行：Alt+Enter 或 Ctrl+J
fn is_newline(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => key.modifiers.contains(KeyModifiers::ALT),
        KeyCode::Char('j') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// 根据当前状态和按键获取对应的 Action
pub fn get_action(view: &ViewState, key: KeyEvent) -> Option<Action> {
    match view {
        ViewState::Idle => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('a') => Some(Action::StartAddQuestion),
            KeyCode::Char('v') | KeyCode::Enter => Some(Action::ViewAnswer),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            _ => None,
        },
        ViewState::Adding(draft) => {
            if is_newline(&key) {
                // 问题是单行的
                return (draft.field == InputField::Answer).then_some(Action::Input('\n'));
            }
            match key.code {
                KeyCode::Esc => Some(Action::Cancel),
                KeyCode::Enter => Some(Action::Submit),
                KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchField),
                KeyCode::Backspace => Some(Action::DeleteChar),
                // AltGr 字符带有 Ctrl+Alt
                KeyCode::Char(_)
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    None
                }
                KeyCode::Char(c) => Some(Action::Input(c)),
                _ => None,
            }
        }
        ViewState::Viewing(_) => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::Cancel),
            _ => None,
        },
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    match get_action(&app.view, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}
