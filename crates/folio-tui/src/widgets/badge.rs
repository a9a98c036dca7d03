//! "Online" badge shown while the chat panel is closed

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

/// Badge size in cells
pub const BADGE_WIDTH: u16 = 42;
pub const BADGE_HEIGHT: u16 = 4;

/// Bottom-right corner slot for the badge
pub fn badge_rect(screen: Rect) -> Rect {
    let width = BADGE_WIDTH.min(screen.width);
    let height = BADGE_HEIGHT.min(screen.height);
    Rect::new(
        screen.x + screen.width - width,
        screen.y + screen.height - height,
        width,
        height,
    )
}

/// Two-line status badge inviting the visitor to open the chat
pub struct StatusBadge<'a> {
    headline: &'a str,
    tagline: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBadge<'a> {
    pub fn new(headline: &'a str, tagline: &'a str, theme: &'a Theme) -> Self {
        Self {
            headline,
            tagline,
            theme,
        }
    }
}

impl Widget for StatusBadge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 3 {
            return;
        }

        Clear.render(area, buf);
        let block = Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(self.theme.ink).bg(self.theme.paper))
            .style(self.theme.panel_style());

        let panel = self.theme.panel_style();
        let lines = vec![
            Line::from(vec![
                Span::styled("● ", Style::default().fg(self.theme.success).bg(self.theme.paper)),
                Span::styled(
                    self.headline.to_uppercase(),
                    panel.add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled(self.tagline, panel.add_modifier(Modifier::ITALIC)),
                Span::styled("  ^O", Style::default().fg(self.theme.dim).bg(self.theme.paper)),
            ]),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
