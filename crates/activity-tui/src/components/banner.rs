use crate::theme::colors::{ERROR_COLOR, HIGHLIGHT_TEXT, SUCCESS_COLOR};
use activity_core::ActivityError;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerVariant {
    Error,
    Success,
    Info,
}

impl BannerVariant {
    fn color(self) -> Color {
        match self {
            BannerVariant::Error => ERROR_COLOR,
            BannerVariant::Success => SUCCESS_COLOR,
            BannerVariant::Info => HIGHLIGHT_TEXT,
        }
    }
}

/// A one-line notification drawn over the top of the board.
///
/// Error banners stay until a key is pressed; the others expire.
#[derive(Debug, Clone)]
pub struct Banner {
    pub message: String,
    pub variant: BannerVariant,
    pub created_at: Instant,
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_variant(message, BannerVariant::Error)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_variant(message, BannerVariant::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_variant(message, BannerVariant::Info)
    }

    pub fn from_error(err: &ActivityError) -> Self {
        let message = match err {
            ActivityError::Connection(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ActivityError::Validation(detail) | ActivityError::NotFound(detail) => detail.clone(),
            ActivityError::Api { detail, .. } => detail.clone(),
            other => other.to_string(),
        };
        Self::error(message)
    }

    fn with_variant(message: impl Into<String>, variant: BannerVariant) -> Self {
        Self {
            message: message.into(),
            variant,
            created_at: Instant::now(),
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.variant == BannerVariant::Error
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        !self.is_blocking() && self.created_at.elapsed() > ttl
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let color = self.variant.color();

        // +4 for border chars and padding
        let box_width = (self.message.chars().count() + 4).min(area.width as usize) as u16;
        let centered_x = area.width.saturating_sub(box_width) / 2;

        let banner_area = Rect {
            x: area.x + centered_x,
            y: area.y,
            width: box_width,
            height: 3.min(area.height),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        let text_style = Style::default().fg(color).add_modifier(Modifier::BOLD);

        let widget = Paragraph::new(self.message.as_str())
            .style(text_style)
            .alignment(Alignment::Center)
            .block(block);

        frame.render_widget(Clear, banner_area);
        frame.render_widget(widget, banner_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_block_and_never_expire() {
        let banner = Banner::error("boom");
        assert!(banner.is_blocking());
        assert!(!banner.is_expired(Duration::ZERO));
    }

    #[test]
    fn test_success_expires() {
        let banner = Banner::success("saved");
        assert!(!banner.is_blocking());
        assert!(!banner.is_expired(Duration::from_secs(60)));
        std::thread::sleep(Duration::from_millis(2));
        assert!(banner.is_expired(Duration::from_millis(1)));
    }

    #[test]
    fn test_from_error_uses_server_detail() {
        let banner = Banner::from_error(&ActivityError::Api {
            status: 500,
            detail: "Erro ao criar atividade".into(),
        });
        assert_eq!(banner.message, "Erro ao criar atividade");

        let banner = Banner::from_error(&ActivityError::Connection("refused".into()));
        assert!(banner.message.contains("server"));
    }
}
