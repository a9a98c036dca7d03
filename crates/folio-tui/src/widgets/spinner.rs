//! Animated activity indicators

use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Span, widgets::Widget};
use std::time::{Duration, Instant};

/// Spinner animation frames
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Typing indicator frames: one dot bounces across three
const TYPING_FRAMES: &[&str] = &["● · ·", "· ● ·", "· · ●", "· ● ·"];

/// Pick a frame from elapsed time
fn frame_at<'f>(frames: &[&'f str], elapsed: Duration, frame_duration: Duration) -> &'f str {
    let index = (elapsed.as_millis() / frame_duration.as_millis().max(1)) as usize;
    frames[index % frames.len()]
}

/// Spinner with a label, used in the panel header while a reply is pending
pub struct Spinner<'a> {
    label: &'a str,
    style: Style,
    start_time: Instant,
}

impl<'a> Spinner<'a> {
    /// Create a new spinner
    pub fn new(label: &'a str, theme: &Theme) -> Self {
        Self {
            label,
            style: theme.accent_style(),
            start_time: Instant::now(),
        }
    }

    /// Create with a specific start time (for consistent animation)
    pub fn with_start_time(mut self, start: Instant) -> Self {
        self.start_time = start;
        self
    }

    /// Override the style
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 {
            return;
        }

        let frame = frame_at(
            SPINNER_FRAMES,
            self.start_time.elapsed(),
            Duration::from_millis(80),
        );
        let text = format!("{} {}", frame, self.label);
        buf.set_span(area.x, area.y, &Span::styled(text, self.style), area.width);
    }
}

/// Three-dot "assistant is typing" bubble
pub struct TypingIndicator<'a> {
    theme: &'a Theme,
    start_time: Instant,
}

impl<'a> TypingIndicator<'a> {
    pub fn new(theme: &'a Theme, start_time: Instant) -> Self {
        Self { theme, start_time }
    }
}

impl Widget for TypingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 7 || area.height == 0 {
            return;
        }

        let frame = frame_at(
            TYPING_FRAMES,
            self.start_time.elapsed(),
            Duration::from_millis(150),
        );
        let span = Span::styled(format!(" {frame} "), self.theme.panel_style());
        buf.set_span(area.x, area.y, &span, area.width);
    }
}
