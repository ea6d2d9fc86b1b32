//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;
pub mod palette;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, Draft, InputField, ViewState};
use crate::models::{QuestionRecord, Theme};
use components::{render_dialog_framework, render_input_widget};
use layouts::centered_rect;
use palette::Palette;

pub const VALIDATION_MESSAGE: &str = "Question and Answer are required.";

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.current_theme());
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 导航栏
            Constraint::Length(2), // 页头
            Constraint::Min(6),    // 卡片列表
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_navbar(frame, app.current_theme(), &palette, chunks[0]);
    render_header(frame, &palette, chunks[1]);
    render_cards(frame, app, &palette, chunks[2]);
    render_help(frame, app, &palette, chunks[3]);

    // 渲染弹窗
    match &app.view {
        ViewState::Adding(draft) => render_add_dialog(frame, draft, &palette),
        ViewState::Viewing(record) => render_answer_dialog(frame, record, &palette),
        ViewState::Idle => {}
    }
}

fn render_navbar(frame: &mut Frame, theme: Theme, palette: &Palette, area: Rect) {
    let toggle_label = match theme {
        Theme::Light => "☾ Dark",
        Theme::Dark => "☀ Light",
    };

    let line = Line::from(vec![
        Span::styled(
            "Futuristic",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Question Hub", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("    "),
        Span::styled("[a] + Add Question", Style::default().fg(palette.highlight)),
        Span::raw("  "),
        Span::styled(format!("[t] {toggle_label}"), Style::default().fg(palette.muted)),
    ]);

    let navbar = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(navbar, area);
}

fn render_header(frame: &mut Frame, palette: &Palette, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Your Questions",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Add questions and view answers in a clean, futuristic interface.",
            Style::default().fg(palette.muted),
        )),
    ]);
    frame.render_widget(header, area);
}

fn render_cards(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    if app.questions.is_empty() {
        let empty = Paragraph::new("No questions yet. Press [a] to create your first one.")
            .style(Style::default().fg(palette.muted))
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .display_list
        .iter()
        .enumerate()
        .filter_map(|(i, id)| app.questions.get(id).map(|record| (i, record)))
        .map(|(i, record)| {
            let mut meta = vec![Span::styled(
                format!("  Created {}", record.created_display()),
                Style::default().fg(palette.muted),
            )];
            if i == app.selected_index {
                meta.push(Span::styled(
                    "  [Enter] View Answer",
                    Style::default().fg(palette.highlight),
                ));
            }

            ListItem::new(vec![
                Line::from(Span::styled(
                    record.question.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(meta),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Questions ({})", app.questions.len()))
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().fg(palette.accent))
        .highlight_symbol("▌");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let help_text = match &app.view {
        ViewState::Idle => "[a] Add  [Enter/v] View Answer  [t] Theme  [j/k] Navigate  [q] Quit",
        ViewState::Adding(draft) => match draft.field {
            InputField::Question => "[Enter] Next field  [Tab] Switch field  [Esc] Cancel",
            InputField::Answer => {
                "[Enter] Save  [Alt+Enter/Ctrl+J] New line  [Tab] Switch field  [Esc] Cancel"
            }
        },
        ViewState::Viewing(_) => "[Esc] Close",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(palette.muted))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_add_dialog(frame: &mut Frame, draft: &Draft, palette: &Palette) {
    let area = centered_rect(60, 60, frame.area());
    let inner = render_dialog_framework(frame, area, "Add Question", palette);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);

    render_input_widget(
        frame,
        chunks[0],
        "Question",
        &draft.question,
        draft.field == InputField::Question,
        draft.question_invalid(),
        palette,
    );
    render_input_widget(
        frame,
        chunks[1],
        "Answer",
        &draft.answer,
        draft.field == InputField::Answer,
        draft.answer_invalid(),
        palette,
    );

    if draft.show_validation() {
        frame.render_widget(
            Paragraph::new(VALIDATION_MESSAGE).style(Style::default().fg(palette.error)),
            chunks[2],
        );
    }
}

fn render_answer_dialog(frame: &mut Frame, record: &QuestionRecord, palette: &Palette) {
    let area = centered_rect(60, 50, frame.area());
    let inner = render_dialog_framework(frame, area, "Answer", palette);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let answer = Paragraph::new(record.answer.as_str())
        .style(Style::default().fg(palette.text))
        .wrap(Wrap { trim: false });
    frame.render_widget(answer, chunks[0]);

    let hint = Paragraph::new("[Esc] Close").style(Style::default().fg(palette.muted));
    frame.render_widget(hint, chunks[1]);
}
