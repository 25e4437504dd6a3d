/// Conversation state: visibility plus the append-only transcript.
pub mod conversation;
/// Draft input with Enter/Shift+Enter handling.
pub mod composer;
/// Event contracts for widget wiring.
pub mod events;
pub mod scroll_manager;
pub mod transcript_list;
pub mod widget;

pub use composer::Composer;
pub use conversation::{Conversation, Role, Turn};
pub use events::Submit;
pub use scroll_manager::ScrollManager;
pub use transcript_list::TranscriptList;
pub use widget::AssistantWidget;
