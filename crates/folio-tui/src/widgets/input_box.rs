//! Text input widget

use crate::input::Action;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Prompt drawn before the text
const PROMPT: &str = "› ";

/// Single-line text input for the chat panel
#[derive(Debug, Default)]
pub struct InputBox {
    /// Current input text
    content: String,
    /// Cursor position (character index, not byte index)
    cursor: usize,
    /// Horizontal scroll offset (in display width)
    scroll: usize,
    /// Placeholder text
    placeholder: String,
    /// Whether the input is focused
    focused: bool,
    /// Whether submitting is currently blocked
    submit_blocked: bool,
}

impl InputBox {
    /// Create a new input box
    pub fn new() -> Self {
        Self::default()
    }

    /// Set placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set focus state
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Mark submit as unavailable (request in flight or empty input)
    pub fn set_submit_blocked(&mut self, blocked: bool) {
        self.submit_blocked = blocked;
    }

    /// Get the current content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content, moving the cursor to the end
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.content.chars().count();
        self.scroll = 0;
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn cursor_display_width(&self) -> usize {
        self.content
            .chars()
            .take(self.cursor)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    fn remove_char_at(&mut self, char_index: usize) {
        let start = self.byte_offset(char_index);
        let end = self.byte_offset(char_index + 1);
        self.content.drain(start..end);
    }

    fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.content.insert(offset, c);
        self.cursor += 1;
    }

    /// Handle an editing action. Returns true if the content or cursor changed.
    pub fn handle_action(&mut self, action: &Action, width: u16) -> bool {
        let char_count = self.content.chars().count();

        let changed = match action {
            Action::Char(c) => {
                self.insert_char(*c);
                true
            }
            Action::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_char_at(self.cursor);
                true
            }
            Action::Delete if self.cursor < char_count => {
                self.remove_char_at(self.cursor);
                true
            }
            Action::Left if self.cursor > 0 => {
                self.cursor -= 1;
                true
            }
            Action::Right if self.cursor < char_count => {
                self.cursor += 1;
                true
            }
            Action::Home => {
                self.cursor = 0;
                true
            }
            Action::End => {
                self.cursor = char_count;
                true
            }
            Action::ClearLine => {
                self.clear();
                true
            }
            Action::DeleteWord => {
                let chars: Vec<char> = self.content.chars().collect();
                let mut start = self.cursor;
                while start > 0 && chars[start - 1] == ' ' {
                    start -= 1;
                }
                while start > 0 && chars[start - 1] != ' ' {
                    start -= 1;
                }
                let (from, to) = (self.byte_offset(start), self.byte_offset(self.cursor));
                self.content.drain(from..to);
                self.cursor = start;
                true
            }
            Action::Paste(text) => {
                // Single-line input: line breaks collapse to one space
                for c in text.chars() {
                    if c == '\n' || c == '\r' {
                        let after_space = self.cursor > 0
                            && self.content.chars().nth(self.cursor - 1) == Some(' ');
                        if self.cursor > 0 && !after_space {
                            self.insert_char(' ');
                        }
                    } else {
                        self.insert_char(c);
                    }
                }
                true
            }
            _ => false,
        };

        if changed {
            self.update_scroll(width as usize);
        }
        changed
    }

    fn update_scroll(&mut self, width: usize) {
        let visible_width = width.saturating_sub(PROMPT.chars().count());
        let cursor_pos = self.cursor_display_width();

        if cursor_pos < self.scroll {
            self.scroll = cursor_pos;
        } else if visible_width > 0 && cursor_pos >= self.scroll + visible_width {
            self.scroll = cursor_pos + 1 - visible_width;
        }
    }

    /// Slice of the content visible after horizontal scrolling
    fn visible_text(&self, visible_width: usize) -> String {
        let mut skipped = 0;
        let mut used = 0;
        let mut visible = String::new();
        for c in self.content.chars() {
            let w = c.width().unwrap_or(0);
            if skipped < self.scroll {
                skipped += w;
                continue;
            }
            if used + w > visible_width {
                break;
            }
            visible.push(c);
            used += w;
        }
        visible
    }

    /// Render the input box
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.ink))
            .style(Style::default().bg(theme.paper));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let prompt_style = if self.submit_blocked {
            Style::default().fg(theme.dim)
        } else {
            Style::default().fg(theme.ink).add_modifier(Modifier::BOLD)
        };

        let prompt_width = PROMPT.chars().count();
        let text_width = (inner.width as usize).saturating_sub(prompt_width);
        let body = if self.content.is_empty() {
            Span::styled(self.placeholder.clone(), Style::default().fg(theme.dim))
        } else {
            Span::styled(self.visible_text(text_width), theme.panel_style())
        };

        Paragraph::new(Line::from(vec![Span::styled(PROMPT, prompt_style), body]))
            .render(inner, buf);

        if self.focused {
            let cursor_x = self.cursor_display_width().saturating_sub(self.scroll);
            if cursor_x < text_width {
                let x = inner.x + (prompt_width + cursor_x) as u16;
                if let Some(cell) = buf.cell_mut((x, inner.y)) {
                    cell.set_style(theme.inverted_panel_style());
                }
            }
        }
    }
}
