//! Transcript widget for the chat panel

use crate::theme::Theme;
use folio_client::{Message, Role};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Label shown above a turn
pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "GUEST_USER",
        Role::Assistant => "SYSTEM_AI",
    }
}

/// Lay out one turn: label line, wrapped body, blank separator.
///
/// Guest turns are right-aligned, assistant turns left-aligned.
fn message_lines(msg: &Message, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let alignment = match msg.role() {
        Role::User => Alignment::Right,
        Role::Assistant => Alignment::Left,
    };
    let body_style = if msg.is_error() {
        Style::default().fg(theme.error).bg(theme.paper)
    } else {
        match msg.role() {
            Role::User => theme.inverted_panel_style(),
            Role::Assistant => theme.panel_style(),
        }
    };

    let mut lines = Vec::new();
    lines.push(
        Line::from(Span::styled(
            role_label(msg.role()),
            Style::default().fg(theme.dim).add_modifier(Modifier::BOLD),
        ))
        .alignment(alignment),
    );

    // Leave a gutter so bubbles never touch the panel edge
    let body_width = width.saturating_sub(4).max(1);
    for segment in textwrap::wrap(msg.content(), body_width) {
        lines.push(Line::from(Span::styled(format!(" {segment} "), body_style)).alignment(alignment));
    }

    lines.push(Line::from(""));
    lines
}

/// Widget for displaying the transcript
pub struct MessageList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    scroll: usize,
}

impl<'a> MessageList<'a> {
    /// Create a new message list
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            scroll: 0,
        }
    }

    /// Set scroll offset (in lines from the top)
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        let visible: Vec<Line> = self
            .messages
            .iter()
            .flat_map(|msg| message_lines(msg, self.theme, width))
            .skip(self.scroll)
            .take(area.height as usize)
            .collect();

        Paragraph::new(visible)
            .style(self.theme.panel_style())
            .render(area, buf);
    }
}

/// Calculate total height of the transcript at the given width
pub fn calculate_message_height(messages: &[Message], width: usize) -> usize {
    let theme = Theme::default();
    messages
        .iter()
        .map(|msg| message_lines(msg, &theme, width).len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_height_counts_label_body_and_separator() {
        let messages = vec![Message::assistant("hello"), Message::user("hi")];
        assert_eq!(calculate_message_height(&messages, 40), 6);
    }

    #[test]
    fn test_height_grows_with_wrapping() {
        let long = "word ".repeat(30);
        let narrow = calculate_message_height(&[Message::assistant(long.clone())], 20);
        let wide = calculate_message_height(&[Message::assistant(long)], 80);
        assert!(narrow > wide);
    }

    #[test]
    fn test_render_shows_labels_and_content() {
        let theme = Theme::default();
        let messages = vec![Message::assistant("SYSTEM ONLINE"), Message::user("hi")];
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);

        MessageList::new(&messages, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("SYSTEM_AI"));
        assert!(text.contains("SYSTEM ONLINE"));
        assert!(text.contains("GUEST_USER"));
        assert!(text.contains("hi"));
    }

    #[test]
    fn test_scroll_skips_lines() {
        let theme = Theme::default();
        let messages = vec![Message::assistant("first"), Message::assistant("second")];
        let area = Rect::new(0, 0, 30, 2);
        let mut buf = Buffer::empty(area);

        MessageList::new(&messages, &theme)
            .scroll(3)
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(!text.contains("first"));
        assert!(text.contains("second"));
    }

    #[test]
    fn test_error_turn_uses_error_color() {
        let theme = Theme::default();
        let lines = message_lines(&Message::system_error("offline"), &theme, 40);
        assert_eq!(lines[1].spans[0].style.fg, Some(theme.error));
    }
}
