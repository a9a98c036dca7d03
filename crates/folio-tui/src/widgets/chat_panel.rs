//! Floating chat panel overlay

use crate::theme::Theme;
use crate::widgets::{InputBox, MessageList, Spinner, TypingIndicator};
use folio_client::Message;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};
use std::time::Instant;

/// Preferred panel size in cells
const PANEL_WIDTH: u16 = 56;
const PANEL_HEIGHT: u16 = 24;

/// Where the panel sits on a screen: bottom-right, clamped to fit
pub fn panel_rect(screen: Rect) -> Rect {
    let width = PANEL_WIDTH.min(screen.width.saturating_sub(2));
    let height = PANEL_HEIGHT.min(screen.height.saturating_sub(2));
    Rect::new(
        screen.x + screen.width.saturating_sub(width + 1),
        screen.y + screen.height.saturating_sub(height + 1),
        width,
        height,
    )
}

/// Regions inside the panel frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub header: Rect,
    pub transcript: Rect,
    pub indicator: Rect,
    pub input: Rect,
}

impl PanelLayout {
    /// Split a panel area (including its frame)
    pub fn new(panel: Rect) -> Self {
        let inner = frame_block(&Theme::default()).inner(panel);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(1),    // Transcript
                Constraint::Length(1), // Typing indicator
                Constraint::Length(2), // Input
            ])
            .split(inner);
        Self {
            header: chunks[0],
            transcript: chunks[1],
            indicator: chunks[2],
            input: chunks[3],
        }
    }
}

fn frame_block(theme: &Theme) -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(theme.ink).bg(theme.paper))
        .style(theme.panel_style())
}

/// The chat window: header, transcript, typing indicator, input
pub struct ChatPanel<'a> {
    title: &'a str,
    messages: &'a [Message],
    input: &'a InputBox,
    theme: &'a Theme,
    scroll: usize,
    awaiting_since: Option<Instant>,
}

impl<'a> ChatPanel<'a> {
    pub fn new(
        title: &'a str,
        messages: &'a [Message],
        input: &'a InputBox,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            messages,
            input,
            theme,
            scroll: 0,
            awaiting_since: None,
        }
    }

    /// Set transcript scroll offset
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Show the pending-reply animations, started at `since`
    pub fn awaiting(mut self, since: Option<Instant>) -> Self {
        self.awaiting_since = since;
        self
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let style = self.theme.inverted_panel_style();
        buf.set_style(area, style);

        let title = Line::from(vec![
            Span::styled(" ● ", style),
            Span::styled(
                self.title.to_uppercase(),
                style.add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(title).render(area, buf);

        let hint = " ^O ✕ ";
        let hint_width = hint.chars().count() as u16;
        if area.width > hint_width {
            let x = area.x + area.width - hint_width;
            buf.set_span(x, area.y, &Span::styled(hint, style), hint_width);

            if let Some(start) = self.awaiting_since {
                let label_width = 12u16;
                if x > area.x + label_width {
                    let spinner_area = Rect::new(x - label_width, area.y, label_width, 1);
                    Spinner::new("thinking", self.theme)
                        .with_start_time(start)
                        .style(style)
                        .render(spinner_area, buf);
                }
            }
        }
    }
}

impl Widget for ChatPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 8 || area.height < 6 {
            return;
        }

        Clear.render(area, buf);
        frame_block(self.theme).render(area, buf);
        let layout = PanelLayout::new(area);

        self.render_header(layout.header, buf);

        MessageList::new(self.messages, self.theme)
            .scroll(self.scroll)
            .render(layout.transcript, buf);

        buf.set_style(layout.indicator, self.theme.panel_style());
        if let Some(start) = self.awaiting_since {
            TypingIndicator::new(self.theme, start).render(layout.indicator, buf);
        }

        self.input.render(layout.input, buf, self.theme);
    }
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
    fn test_panel_rect_anchors_bottom_right() {
        let screen = Rect::new(0, 0, 120, 40);
        let panel = panel_rect(screen);
        assert_eq!(panel.width, PANEL_WIDTH);
        assert_eq!(panel.height, PANEL_HEIGHT);
        assert_eq!(panel.right(), 119);
        assert_eq!(panel.bottom(), 39);
    }

    #[test]
    fn test_panel_rect_clamps_on_small_screens() {
        let panel = panel_rect(Rect::new(0, 0, 30, 10));
        assert_eq!(panel.width, 28);
        assert_eq!(panel.height, 8);
    }

    #[test]
    fn test_layout_regions_fit_inside_frame() {
        let panel = Rect::new(0, 0, 40, 20);
        let layout = PanelLayout::new(panel);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.indicator.height, 1);
        assert_eq!(layout.input.height, 2);
        assert_eq!(layout.transcript.height, 20 - 2 - 4);
        assert_eq!(layout.transcript.width, 38);
    }

    #[test]
    fn test_render_shows_title_transcript_and_placeholder() {
        let theme = Theme::default();
        let messages = vec![Message::assistant("SYSTEM ONLINE.")];
        let input = InputBox::new().with_placeholder("QUERY DATABASE...");
        let area = Rect::new(0, 0, 40, 14);
        let mut buf = Buffer::empty(area);

        ChatPanel::new("Folio.AI // Terminal", &messages, &input, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("FOLIO.AI // TERMINAL"));
        assert!(text.contains("SYSTEM ONLINE."));
        assert!(text.contains("QUERY DATABASE..."));
    }
}
