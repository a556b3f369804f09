use super::colors::*;
use activity_domain::ActivityStatus;
use ratatui::style::{Modifier, Style};

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

/// Border of the column a grabbed activity is over.
pub fn drop_border() -> Style {
    Style::default()
        .fg(DROP_BORDER)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_item() -> Style {
    Style::default().bg(SELECTED_BG)
}

pub fn grabbed_item() -> Style {
    Style::default()
        .fg(GRABBED_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn highlight_text() -> Style {
    Style::default().fg(HIGHLIGHT_TEXT)
}

pub fn bold_highlight() -> Style {
    Style::default()
        .fg(HIGHLIGHT_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn status_style(status: ActivityStatus) -> Style {
    let color = match status {
        ActivityStatus::Pending => STATUS_PENDING,
        ActivityStatus::InProgress => STATUS_IN_PROGRESS,
        ActivityStatus::Done => STATUS_DONE,
    };
    Style::default().fg(color)
}

pub fn popup_bg() -> Style {
    Style::default().bg(POPUP_BG)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}
