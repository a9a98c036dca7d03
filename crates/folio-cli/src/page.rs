//! Portfolio page rendering

use crate::content::{self, Project};
use folio_tui::{Theme, widgets::Marquee};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};
use std::time::Instant;

/// Horizontal margin around the page body
const MARGIN: u16 = 2;

/// Body area of the page below the pinned navigation bar
pub fn body_rect(screen: Rect) -> Rect {
    Rect::new(
        screen.x + MARGIN,
        screen.y + 1,
        screen.width.saturating_sub(MARGIN * 2),
        screen.height.saturating_sub(1),
    )
}

/// The page laid out for one width
pub struct PageView {
    lines: Vec<Line<'static>>,
    marquee_row: usize,
    project_rows: Vec<usize>,
}

impl PageView {
    /// Lay out every section at `width` with project `selected` highlighted
    pub fn build(theme: &Theme, width: u16, selected: usize) -> Self {
        let width = width.max(20) as usize;
        let mut view = Self {
            lines: Vec::new(),
            marquee_row: 0,
            project_rows: Vec::new(),
        };

        view.hero(theme, width);
        view.blank();
        view.marquee_row = view.lines.len();
        view.blank();
        view.blank();
        view.projects(theme, width, selected);
        view.capabilities(theme, width);
        view.contact(theme);
        view.footer(theme);
        view
    }

    /// Total height in rows
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Row where project card `index` begins
    pub fn project_row(&self, index: usize) -> Option<usize> {
        self.project_rows.get(index).copied()
    }

    fn blank(&mut self) {
        self.lines.push(Line::from(""));
    }

    fn wrapped(&mut self, text: &str, width: usize, indent: &str, style: Style) {
        let avail = width.saturating_sub(indent.chars().count()).max(1);
        for segment in textwrap::wrap(text, avail) {
            self.lines
                .push(Line::from(Span::styled(format!("{indent}{segment}"), style)));
        }
    }

    fn heading(&mut self, theme: &Theme, width: usize, title: &str, index: &str) {
        let pad = width.saturating_sub(title.chars().count() + index.chars().count());
        self.lines.push(Line::from(vec![
            Span::styled(title.to_string(), theme.accent_bold()),
            Span::raw(" ".repeat(pad)),
            Span::styled(index.to_string(), theme.dim_style().add_modifier(Modifier::BOLD)),
        ]));
        self.lines
            .push(Line::from(Span::styled("━".repeat(width), theme.base_style())));
        self.blank();
    }

    fn hero(&mut self, theme: &Theme, width: usize) {
        self.blank();
        self.lines.push(Line::from(Span::styled(
            " [01] Overview ",
            theme.inverted_panel_style().add_modifier(Modifier::BOLD),
        )));
        self.blank();
        let [first, second] = content::HERO_LINES;
        self.lines.push(Line::from(Span::styled(
            first,
            theme.base_style().add_modifier(Modifier::BOLD),
        )));
        self.lines.push(Line::from(vec![
            Span::styled("━━━━━━ ", theme.base_style()),
            Span::styled(
                second,
                theme
                    .base_style()
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            ),
        ]));
        self.blank();
        self.lines
            .push(Line::from(Span::styled("─".repeat(width), theme.border_style())));
        self.wrapped(content::HERO_TAGLINE, width, "", theme.base_style());
        self.blank();
        for fact in content::HERO_FACTS {
            self.lines.push(
                Line::from(Span::styled(fact.to_uppercase(), theme.dim_style()))
                    .alignment(Alignment::Right),
            );
        }
    }

    fn projects(&mut self, theme: &Theme, width: usize, selected: usize) {
        self.heading(theme, width, "SELECTED WORKS", "[02]");

        for (i, project) in content::PROJECTS.iter().enumerate() {
            self.project_rows.push(self.lines.len());
            let is_selected = i == selected;
            let title_style = if is_selected {
                theme.inverted_panel_style().add_modifier(Modifier::BOLD)
            } else {
                theme.base_style().add_modifier(Modifier::BOLD)
            };
            let marker = if is_selected { "▶ " } else { "  " };
            self.lines.push(Line::from(vec![
                Span::styled(marker, theme.accent_style()),
                Span::styled(format!(" {} ", project.title.to_uppercase()), title_style),
            ]));
            self.wrapped(project.description, width, "   ", theme.base_style());

            let mut tags = vec![Span::raw("   ")];
            for tag in project.tags {
                tags.push(Span::styled(format!("[{tag}]"), theme.dim_style()));
                tags.push(Span::raw(" "));
            }
            self.lines.push(Line::from(tags));
            if is_selected {
                self.lines.push(Line::from(Span::styled(
                    "   Enter: expand artifact",
                    theme.accent_style(),
                )));
            }
            self.blank();
        }

        self.lines.push(Line::from(vec![
            Span::styled("  DIRECTORY ", theme.dim_style()),
            Span::styled("ARCHIVE.", theme.base_style().add_modifier(Modifier::BOLD)),
        ]));
        self.lines.push(Line::from(Span::styled(
            format!("  View Complete GitHub ↗ {}", content::ARCHIVE_URL),
            theme.base_style().add_modifier(Modifier::UNDERLINED),
        )));
        self.blank();
        self.blank();
    }

    fn capabilities(&mut self, theme: &Theme, width: usize) {
        self.heading(theme, width, "CAPABILITIES", "[03]");

        for row in content::CAPABILITIES {
            let used = row.title.chars().count() + row.details.chars().count() + 2;
            if used + 3 <= width {
                self.lines.push(Line::from(vec![
                    Span::styled(row.title.to_uppercase(), theme.base_style().add_modifier(Modifier::BOLD)),
                    Span::styled(format!(" {} ", ".".repeat(width - used)), theme.dim_style()),
                    Span::styled(row.details, theme.dim_style()),
                ]));
            } else {
                self.lines.push(Line::from(Span::styled(
                    row.title.to_uppercase(),
                    theme.base_style().add_modifier(Modifier::BOLD),
                )));
                self.wrapped(row.details, width, "  ", theme.dim_style());
            }
            self.lines
                .push(Line::from(Span::styled("─".repeat(width), theme.border_style())));
        }
        self.blank();

        let ticket = theme.inverted_panel_style();
        self.lines.push(Line::from(Span::styled(
            format!("{:<width$}", " PROFESSIONAL LEDGER ●"),
            ticket.add_modifier(Modifier::BOLD),
        )));
        for entry in content::EXPERIENCE {
            let left = format!(" {} @ {}", entry.role.to_uppercase(), entry.company);
            let pad = width.saturating_sub(left.chars().count() + entry.date.len() + 1);
            self.lines.push(Line::from(Span::styled(
                format!("{left}{}{} ", " ".repeat(pad), entry.date),
                ticket,
            )));
        }
        self.lines.push(Line::from(Span::styled(
            format!("{:<width$}", format!(" {}", content::QUOTE)),
            ticket.add_modifier(Modifier::ITALIC),
        )));
        self.blank();
        self.blank();
    }

    fn contact(&mut self, theme: &Theme) {
        self.lines.push(
            Line::from(Span::styled(
                " [04] Final Operations ",
                theme.inverted_panel_style().add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );
        self.blank();
        self.lines.push(
            Line::from(Span::styled(
                content::CONTACT_HEADING,
                theme.base_style().add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );
        self.blank();
        self.lines.push(
            Line::from(Span::styled(
                format!("{} ↗", content::CONTACT_EMAIL),
                theme.base_style().add_modifier(Modifier::UNDERLINED | Modifier::ITALIC),
            ))
            .alignment(Alignment::Center),
        );
        self.blank();
        self.blank();
    }

    fn footer(&mut self, theme: &Theme) {
        self.lines.push(
            Line::from(Span::styled(content::FOOTER, theme.dim_style()))
                .alignment(Alignment::Center),
        );
    }
}

/// Pinned navigation bar
pub struct NavBar<'a> {
    theme: &'a Theme,
}

impl<'a> NavBar<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.theme.inverted_panel_style();
        buf.set_style(area, style);

        let mut spans = vec![Span::styled(
            format!(" {} ", content::OWNER),
            style.add_modifier(Modifier::BOLD | Modifier::ITALIC),
        )];
        let links: Vec<String> = content::NAV_ITEMS
            .iter()
            .map(|item| format!(" {} ", item.to_uppercase()))
            .collect();
        let links_width: usize = links.iter().map(|l| l.chars().count()).sum();
        let pad = (area.width as usize)
            .saturating_sub(content::OWNER.chars().count() + 2 + links_width);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.extend(links.into_iter().map(|l| Span::styled(l, style)));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// The scrolled page body
pub struct Page<'a> {
    view: &'a PageView,
    theme: &'a Theme,
    scroll: usize,
    marquee_start: Instant,
}

impl<'a> Page<'a> {
    pub fn new(view: &'a PageView, theme: &'a Theme, marquee_start: Instant) -> Self {
        Self {
            view,
            theme,
            scroll: 0,
            marquee_start,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for Page<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let visible: Vec<Line> = self
            .view
            .lines
            .iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .cloned()
            .collect();
        Paragraph::new(visible)
            .style(self.theme.base_style())
            .render(area, buf);

        let row = self.view.marquee_row;
        if row >= self.scroll && row < self.scroll + area.height as usize {
            // The ticker spans the full screen width, ignoring the page margin
            let y = area.y + (row - self.scroll) as u16;
            let x = area.x.saturating_sub(MARGIN);
            let band = Rect::new(x, y, area.width + (area.x - x) * 2, 1).intersection(buf.area);
            Marquee::new(content::MARQUEE_TEXT, self.theme)
                .with_start_time(self.marquee_start)
                .render(band, buf);
        }
    }
}

/// Centered region for the project preview
pub fn preview_rect(screen: Rect) -> Rect {
    let width = (screen.width / 5 * 3).max(30).min(screen.width);
    let height = 12u16.min(screen.height);
    Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    )
}

/// Expanded view of one project card
pub struct ProjectPreview<'a> {
    project: &'a Project,
    theme: &'a Theme,
}

impl<'a> ProjectPreview<'a> {
    pub fn new(project: &'a Project, theme: &'a Theme) -> Self {
        Self { project, theme }
    }
}

impl Widget for ProjectPreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let panel = self.theme.panel_style();
        let block = Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(self.theme.ink).bg(self.theme.paper))
            .style(panel)
            .title(Span::styled(
                format!(" {} ", self.project.title.to_uppercase()),
                panel.add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(Span::styled(" Esc: close ", panel)).alignment(Alignment::Right));

        let tags = self
            .project
            .tags
            .iter()
            .map(|t| format!("[{t}]"))
            .collect::<Vec<_>>()
            .join(" ");
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(self.project.description, panel)),
            Line::from(""),
            Line::from(Span::styled(tags, panel.add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(Span::styled(
                format!("↗ {}", self.project.link),
                panel.add_modifier(Modifier::UNDERLINED),
            )),
        ];

        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
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

    fn view_text(view: &PageView) -> String {
        view.lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_sections_appear_in_order() {
        let view = PageView::build(&Theme::default(), 80, 0);
        let text = view_text(&view);

        let order = [
            "SOFTWARE",
            "ARCHITECT.",
            "CURRENT RANK: 7TH SEM BSCS",
            "SELECTED WORKS",
            "TEAMSYNC",
            "RESUMEAI",
            "SHOPPLUS",
            "CAPABILITIES",
            "FRONTEND ARCHITECTURE",
            "PROFESSIONAL LEDGER",
            "INITIATE.",
            content::FOOTER,
        ];
        let mut last = 0;
        for needle in order {
            let pos = text[last..]
                .find(needle)
                .unwrap_or_else(|| panic!("{needle} missing or out of order"));
            last += pos;
        }
    }

    #[test]
    fn test_selection_moves_expand_hint() {
        let theme = Theme::default();
        let first = PageView::build(&theme, 80, 0);
        let second = PageView::build(&theme, 80, 1);

        let hint_row = |view: &PageView| {
            view.lines
                .iter()
                .position(|l| l.to_string().contains("Enter: expand artifact"))
        };
        let first_hint = hint_row(&first).unwrap();
        let second_hint = hint_row(&second).unwrap();
        assert!(first_hint < first.project_row(1).unwrap());
        assert!(second_hint > second.project_row(1).unwrap());
    }

    #[test]
    fn test_narrow_layout_wraps_ledger_rows() {
        let theme = Theme::default();
        let wide = PageView::build(&theme, 100, 0);
        let narrow = PageView::build(&theme, 30, 0);
        assert!(narrow.height() > wide.height());
    }

    #[test]
    fn test_page_renders_marquee_band() {
        let theme = Theme::default();
        let view = PageView::build(&theme, 60, 0);
        let screen = Rect::new(0, 0, 64, 40);
        let mut buf = Buffer::empty(screen);

        Page::new(&view, &theme, Instant::now()).render(body_rect(screen), &mut buf);

        assert!(buffer_text(&buf).contains("MERN STACK"));
    }

    #[test]
    fn test_preview_shows_project_details() {
        let theme = Theme::default();
        let screen = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(screen);

        ProjectPreview::new(&content::PROJECTS[1], &theme).render(preview_rect(screen), &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("RESUMEAI"));
        assert!(text.contains("[Vite]"));
        assert!(text.contains("Esc: close"));
    }

    #[test]
    fn test_nav_bar_lists_sections() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        NavBar::new(&theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Saad."));
        assert!(text.contains("CAPABILITIES"));
    }
}
