//! Full-screen portfolio with the chat overlay

use crossterm::event::{Event, EventStream, MouseEventKind};
use folio_chat::{ChatEvent, ChatSession};
use folio_tui::{
    App, Theme,
    input::{Action, event_to_action},
    widgets::{
        ChatPanel, InputBox, PanelLayout, StatusBadge, badge::badge_rect,
        chat_panel::panel_rect, message_list::calculate_message_height,
    },
};
use futures::StreamExt;
use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::content;
use crate::page::{self, NavBar, Page, PageView, ProjectPreview};
use crate::utils::clamp_scroll;

/// Rows to move per PageUp/PageDown
const PAGE_STEP: usize = 10;
/// Rows to move per mouse wheel notch
const WHEEL_STEP: usize = 3;

/// TUI application state
pub struct TuiState {
    /// Chat widget and its requests
    session: ChatSession,
    /// Chat input box
    input: InputBox,
    theme: Theme,
    /// Page scroll position
    page_scroll: usize,
    /// Selected project card
    selected_project: usize,
    /// Scroll the selected card into view on the next render
    reveal_selection: bool,
    /// Whether the project preview overlay is open
    preview_open: bool,
    /// Transcript scroll position (`usize::MAX` sticks to the bottom)
    chat_scroll: usize,
    /// Marquee animation start
    started: Instant,
    /// When the pending request was submitted
    awaiting_since: Option<Instant>,
}

impl TuiState {
    pub fn new(session: ChatSession, theme: Theme) -> Self {
        let input = InputBox::new().with_placeholder(content::CHAT_PLACEHOLDER);

        let mut state = Self {
            session,
            input,
            theme,
            page_scroll: 0,
            selected_project: 0,
            reveal_selection: false,
            preview_open: false,
            chat_scroll: usize::MAX,
            started: Instant::now(),
            awaiting_since: None,
        };
        state.sync_input();
        state
    }

    /// Mirror session state onto the input box
    fn sync_input(&mut self) {
        let widget = self.session.widget();
        self.input.set_focused(widget.panel_open());
        self.input.set_submit_blocked(!widget.can_submit());
        if !widget.awaiting_reply() {
            self.awaiting_since = None;
        }
        if self.session.take_scroll_request() {
            self.chat_scroll = usize::MAX;
        }
    }

    /// Apply a request event from the chat session
    pub fn handle_chat_event(&mut self, event: ChatEvent) {
        self.session.apply(event);
        self.sync_input();
    }

    /// Handle a mouse wheel movement
    pub fn handle_mouse(&mut self, kind: MouseEventKind) {
        let scroll = if self.session.widget().panel_open() {
            &mut self.chat_scroll
        } else {
            &mut self.page_scroll
        };
        match kind {
            MouseEventKind::ScrollUp => *scroll = scroll.saturating_sub(WHEEL_STEP),
            MouseEventKind::ScrollDown => *scroll = scroll.saturating_add(WHEEL_STEP),
            _ => {}
        }
    }

    /// Handle keyboard action. Returns false when the user asked to quit.
    pub fn handle_action(&mut self, action: Action, screen: Rect) -> bool {
        let keep_running = if self.preview_open {
            self.handle_preview_action(action)
        } else if matches!(action, Action::TogglePanel) {
            self.session.toggle_panel();
            true
        } else if self.session.widget().panel_open() {
            self.handle_panel_action(action, screen)
        } else {
            self.handle_page_action(action)
        };

        self.sync_input();
        keep_running
    }

    fn handle_preview_action(&mut self, action: Action) -> bool {
        match action {
            Action::Escape | Action::Submit => {
                self.preview_open = false;
                true
            }
            Action::Quit | Action::Interrupt => false,
            _ => true,
        }
    }

    fn handle_panel_action(&mut self, action: Action, screen: Rect) -> bool {
        match action {
            Action::Submit => {
                match self.session.submit() {
                    Ok(id) => {
                        tracing::debug!(id, "submitted chat message");
                        self.input.clear();
                        self.awaiting_since = Some(Instant::now());
                    }
                    Err(rejection) => {
                        tracing::debug!(?rejection, "submit rejected");
                    }
                }
                true
            }
            Action::Escape => {
                if !self.session.abort() {
                    self.session.toggle_panel();
                }
                true
            }
            Action::Interrupt => self.session.abort(),
            Action::Quit | Action::Eof => false,
            Action::Up => {
                self.chat_scroll = self.chat_scroll.saturating_sub(1);
                true
            }
            Action::Down => {
                self.chat_scroll = self.chat_scroll.saturating_add(1);
                true
            }
            Action::PageUp => {
                self.chat_scroll = self.chat_scroll.saturating_sub(PAGE_STEP);
                true
            }
            Action::PageDown => {
                self.chat_scroll = self.chat_scroll.saturating_add(PAGE_STEP);
                true
            }
            _ => {
                let width = PanelLayout::new(panel_rect(screen)).input.width;
                if self.input.handle_action(&action, width) {
                    self.session.update_input(self.input.content());
                }
                true
            }
        }
    }

    fn handle_page_action(&mut self, action: Action) -> bool {
        let count = content::PROJECTS.len();
        match action {
            Action::Char('?') => self.session.toggle_panel(),
            Action::Char('q') | Action::Quit | Action::Interrupt | Action::Eof => return false,
            Action::Escape => return false,
            Action::Up => self.page_scroll = self.page_scroll.saturating_sub(1),
            Action::Down => self.page_scroll = self.page_scroll.saturating_add(1),
            Action::PageUp => self.page_scroll = self.page_scroll.saturating_sub(PAGE_STEP),
            Action::PageDown => self.page_scroll = self.page_scroll.saturating_add(PAGE_STEP),
            Action::Home => self.page_scroll = 0,
            Action::End => self.page_scroll = usize::MAX,
            Action::Tab => {
                self.selected_project = (self.selected_project + 1) % count;
                self.reveal_selection = true;
            }
            Action::BackTab => {
                self.selected_project = (self.selected_project + count - 1) % count;
                self.reveal_selection = true;
            }
            Action::Submit => self.preview_open = true,
            _ => {}
        }
        true
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let screen = frame.area();
        frame.render_widget(Block::default().style(self.theme.base_style()), screen);
        if screen.height < 2 {
            return;
        }

        frame.render_widget(NavBar::new(&self.theme), Rect::new(screen.x, screen.y, screen.width, 1));
        self.render_page(frame, screen);

        if self.preview_open {
            let project = &content::PROJECTS[self.selected_project];
            frame.render_widget(
                ProjectPreview::new(project, &self.theme),
                page::preview_rect(screen),
            );
        }

        if self.session.widget().panel_open() {
            self.render_chat(frame, screen);
        } else {
            frame.render_widget(
                StatusBadge::new(content::BADGE_HEADLINE, content::BADGE_TAGLINE, &self.theme),
                badge_rect(screen),
            );
        }
    }

    fn render_page(&mut self, frame: &mut Frame, screen: Rect) {
        let body = page::body_rect(screen);
        let view = PageView::build(&self.theme, body.width, self.selected_project);

        if self.reveal_selection {
            if let Some(row) = view.project_row(self.selected_project) {
                self.page_scroll = row.saturating_sub(2);
            }
            self.reveal_selection = false;
        }
        self.page_scroll = clamp_scroll(self.page_scroll, view.height(), body.height as usize);

        frame.render_widget(
            Page::new(&view, &self.theme, self.started).scroll(self.page_scroll),
            body,
        );

        let max_scroll = view.height().saturating_sub(body.height as usize);
        if max_scroll > 0 {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.page_scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None)
                    .style(self.theme.dim_style()),
                Rect::new(screen.x, body.y, screen.width, body.height),
                &mut scrollbar_state,
            );
        }
    }

    fn render_chat(&mut self, frame: &mut Frame, screen: Rect) {
        let area = panel_rect(screen);
        let layout = PanelLayout::new(area);
        let widget = self.session.widget();

        let content_height =
            calculate_message_height(widget.messages(), layout.transcript.width as usize);
        self.chat_scroll = clamp_scroll(
            self.chat_scroll,
            content_height,
            layout.transcript.height as usize,
        );

        let awaiting = if widget.awaiting_reply() {
            Some(self.awaiting_since.unwrap_or(self.started))
        } else {
            None
        };

        frame.render_widget(
            ChatPanel::new(content::CHAT_TITLE, widget.messages(), &self.input, &self.theme)
                .scroll(self.chat_scroll)
                .awaiting(awaiting),
            area,
        );
    }
}

/// Run the TUI application
pub async fn run_tui(
    session: ChatSession,
    mut events: mpsc::UnboundedReceiver<ChatEvent>,
    theme: Theme,
) -> anyhow::Result<()> {
    let mut app = App::new()?;
    let mut state = TuiState::new(session, theme);

    // Event stream
    let mut event_stream = EventStream::new();

    // Tick interval for animations (spinner, typing dots, marquee)
    let mut tick_interval = tokio::time::interval(Duration::from_millis(80));

    loop {
        app.draw(|frame| state.render(frame))?;
        let size = app.size()?;
        let screen = Rect::new(0, 0, size.width, size.height);

        tokio::select! {
            biased;

            // Chat events first so replies show up promptly
            Some(event) = events.recv() => {
                state.handle_chat_event(event);
            }

            event = event_stream.next() => {
                match event {
                    Some(Ok(Event::Mouse(mouse))) => state.handle_mouse(mouse.kind),
                    Some(Ok(event)) => {
                        if let Some(action) = event_to_action(event) {
                            if !state.handle_action(action, screen) {
                                break;
                            }
                        }
                    }
                    Some(Err(e)) => {
                        return Err(anyhow::anyhow!("Event error: {}", e));
                    }
                    None => break,
                }
            }

            _ = tick_interval.tick() => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use folio_chat::SessionConfig;
    use folio_client::{Message, Transport};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    struct Echo;

    #[async_trait]
    impl Transport for Echo {
        async fn send(&self, message: &str) -> folio_client::Result<String> {
            Ok(format!("echo: {message}"))
        }
    }

    const SCREEN: Rect = Rect::new(0, 0, 100, 40);

    fn state() -> (TuiState, mpsc::UnboundedReceiver<ChatEvent>) {
        let (session, events) = ChatSession::new(SessionConfig::default(), Arc::new(Echo));
        (TuiState::new(session, Theme::default()), events)
    }

    fn type_text(state: &mut TuiState, text: &str) {
        for c in text.chars() {
            state.handle_action(Action::Char(c), SCREEN);
        }
    }

    fn render_text(state: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(SCREEN.width, SCREEN.height)).unwrap();
        terminal.draw(|frame| state.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[tokio::test]
    async fn test_question_mark_opens_panel_and_typing_reaches_session() {
        let (mut state, _events) = state();
        state.handle_action(Action::Char('?'), SCREEN);
        assert!(state.session.widget().panel_open());

        type_text(&mut state, "who?");
        assert_eq!(state.session.widget().input(), "who?");
        assert_eq!(state.input.content(), "who?");
    }

    #[tokio::test]
    async fn test_submit_then_reply() {
        let (mut state, mut events) = state();
        state.handle_action(Action::TogglePanel, SCREEN);
        type_text(&mut state, "hi");

        assert!(state.handle_action(Action::Submit, SCREEN));
        assert_eq!(state.input.content(), "");
        assert!(state.session.widget().awaiting_reply());
        assert!(state.awaiting_since.is_some());

        while state.session.widget().awaiting_reply() {
            let event = events.recv().await.unwrap();
            state.handle_chat_event(event);
        }

        assert_eq!(
            state.session.widget().messages().last(),
            Some(&Message::assistant("echo: hi"))
        );
        assert!(state.awaiting_since.is_none());
        assert_eq!(state.chat_scroll, usize::MAX);
    }

    #[tokio::test]
    async fn test_blank_submit_keeps_input() {
        let (mut state, _events) = state();
        state.handle_action(Action::TogglePanel, SCREEN);
        type_text(&mut state, "   ");
        state.handle_action(Action::Submit, SCREEN);

        assert_eq!(state.input.content(), "   ");
        assert_eq!(state.session.widget().messages().len(), 1);
    }

    #[tokio::test]
    async fn test_escape_closes_panel_when_idle() {
        let (mut state, _events) = state();
        state.handle_action(Action::TogglePanel, SCREEN);
        assert!(state.handle_action(Action::Escape, SCREEN));
        assert!(!state.session.widget().panel_open());
    }

    #[tokio::test]
    async fn test_project_selection_wraps_and_opens_preview() {
        let (mut state, _events) = state();
        state.handle_action(Action::BackTab, SCREEN);
        assert_eq!(state.selected_project, content::PROJECTS.len() - 1);
        state.handle_action(Action::Tab, SCREEN);
        assert_eq!(state.selected_project, 0);

        state.handle_action(Action::Submit, SCREEN);
        assert!(state.preview_open);
        // Keys other than close are swallowed by the preview
        state.handle_action(Action::TogglePanel, SCREEN);
        assert!(!state.session.widget().panel_open());
        state.handle_action(Action::Escape, SCREEN);
        assert!(!state.preview_open);
    }

    #[tokio::test]
    async fn test_quit_keys_on_page() {
        let (mut state, _events) = state();
        assert!(!state.handle_action(Action::Char('q'), SCREEN));
        assert!(!state.handle_action(Action::Quit, SCREEN));
    }

    #[tokio::test]
    async fn test_render_shows_badge_then_panel() {
        let (mut state, _events) = state();
        let closed = render_text(&mut state);
        assert!(closed.contains("DIGITAL TWIN // ONLINE"));
        assert!(closed.contains("SOFTWARE"));

        state.handle_action(Action::TogglePanel, SCREEN);
        let open = render_text(&mut state);
        assert!(open.contains("SAAD.AI // TERMINAL"));
        assert!(open.contains("SYSTEM_AI"));
        assert!(open.contains("QUERY DATABASE..."));
        assert!(!open.contains("DIGITAL TWIN // ONLINE"));
    }

    #[tokio::test]
    async fn test_page_scroll_is_clamped_on_render() {
        let (mut state, _events) = state();
        state.handle_action(Action::End, SCREEN);
        render_text(&mut state);
        assert!(state.page_scroll < usize::MAX);
        assert!(state.page_scroll > 0);
    }
}
