//! Color theme support

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Page background color
    pub bg: Color,
    /// Primary text color
    pub fg: Color,
    /// Dimmed/secondary text
    pub dim: Color,
    /// Accent color (headings, highlights)
    pub accent: Color,
    /// Error color
    pub error: Color,
    /// Success color (online indicator)
    pub success: Color,
    /// Border color
    pub border: Color,
    /// Chat panel background
    pub paper: Color,
    /// Chat panel foreground and frame
    pub ink: Color,
    /// Selection/highlight background
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::paper()
    }
}

impl Theme {
    /// Near-black page with a paper-colored chat panel (default)
    pub fn paper() -> Self {
        Self {
            bg: Color::Rgb(10, 10, 10),
            fg: Color::Rgb(242, 242, 236),
            dim: Color::Rgb(120, 120, 120),
            accent: Color::Rgb(168, 85, 247),
            error: Color::Rgb(220, 38, 38),
            success: Color::Rgb(22, 163, 74),
            border: Color::Rgb(60, 60, 60),
            paper: Color::Rgb(242, 242, 236),
            ink: Color::Rgb(17, 17, 17),
            selection_bg: Color::Rgb(40, 40, 40),
        }
    }

    /// Plain ANSI colors for terminals without truecolor
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Magenta,
            error: Color::Red,
            success: Color::Green,
            border: Color::DarkGray,
            paper: Color::White,
            ink: Color::Black,
            selection_bg: Color::DarkGray,
        }
    }

    /// Look a theme up by its config name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "paper" => Some(Self::paper()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    /// Get base style
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get dimmed style
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// Get accent style
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Get bold accent style
    pub fn accent_bold(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Get error style
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Get success style
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Get border style
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Ink on paper, for the chat panel body
    pub fn panel_style(&self) -> Style {
        Style::default().fg(self.ink).bg(self.paper)
    }

    /// Paper on ink, for the panel header and guest turns
    pub fn inverted_panel_style(&self) -> Style {
        Style::default().fg(self.paper).bg(self.ink)
    }
}
