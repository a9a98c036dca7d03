//! Endless horizontal ticker

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Widget,
};
use std::time::{Duration, Instant};

/// Time for the ticker to advance one column
pub const DEFAULT_STEP: Duration = Duration::from_millis(240);

/// The `width` columns of an endlessly repeated `text`, starting `offset` chars in.
pub fn marquee_window(text: &str, offset: usize, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return " ".repeat(width);
    }
    (0..width)
        .map(|i| chars[(offset + i) % chars.len()])
        .collect()
}

/// Ticker that scrolls its text right-to-left as time passes
pub struct Marquee<'a> {
    text: &'a str,
    style: Style,
    start_time: Instant,
    step: Duration,
}

impl<'a> Marquee<'a> {
    pub fn new(text: &'a str, theme: &Theme) -> Self {
        Self {
            text,
            style: Style::default()
                .fg(theme.bg)
                .bg(theme.fg)
                .add_modifier(Modifier::BOLD),
            start_time: Instant::now(),
            step: DEFAULT_STEP,
        }
    }

    pub fn with_start_time(mut self, start: Instant) -> Self {
        self.start_time = start;
        self
    }

    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    fn offset(&self) -> usize {
        (self.start_time.elapsed().as_millis() / self.step.as_millis().max(1)) as usize
    }
}

impl Widget for Marquee<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        buf.set_style(area, self.style);
        let row = area.y + area.height / 2;
        let window = marquee_window(self.text, self.offset(), area.width as usize);
        buf.set_span(area.x, row, &Span::styled(window, self.style), area.width);
    }
}
