//! Custom widgets for the TUI

pub mod badge;
pub mod chat_panel;
pub mod input_box;
pub mod marquee;
pub mod message_list;
pub mod spinner;

pub use badge::StatusBadge;
pub use chat_panel::{ChatPanel, PanelLayout};
pub use input_box::InputBox;
pub use marquee::Marquee;
pub use message_list::MessageList;
pub use spinner::{Spinner, TypingIndicator};
