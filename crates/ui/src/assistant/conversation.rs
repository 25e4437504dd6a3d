/// Chat speaker role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Widget-scoped conversation state: visibility plus the append-only
/// transcript.
///
/// Turns are never mutated or removed once appended; insertion order is
/// display order. Visibility changes never touch the transcript, so closing
/// and reopening the panel preserves history for the life of the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    is_open: bool,
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Flips panel visibility and returns the new state.
    pub fn toggle_open(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }

    /// Forces the panel closed. No-op when already closed.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Appends a user turn with surrounding whitespace trimmed.
    ///
    /// Returns `false` without any state change when the text is empty after
    /// trimming.
    pub fn append_user(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }

        self.turns.push(Turn::user(trimmed));
        true
    }

    /// Appends an assistant turn unconditionally; empty replies are allowed
    /// because they are not user-controlled.
    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::assistant(text));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_user_input_is_ignored() {
        let mut conversation = Conversation::new();

        assert!(!conversation.append_user(""));
        assert!(!conversation.append_user("   \n\t  "));
        assert!(conversation.turns().is_empty());
    }

    #[test]
    fn user_turns_are_trimmed_before_append() {
        let mut conversation = Conversation::new();

        assert!(conversation.append_user("  leaf spots on my chilli plant \n"));
        assert_eq!(
            conversation.turns(),
            &[Turn::user("leaf spots on my chilli plant")]
        );
    }

    #[test]
    fn assistant_turns_append_unconditionally() {
        let mut conversation = Conversation::new();

        conversation.append_assistant("Apply neem oil.");
        conversation.append_assistant("");

        assert_eq!(conversation.turns().len(), 2);
        assert_eq!(conversation.turns()[1], Turn::assistant(""));
    }

    #[test]
    fn transcript_preserves_insertion_order() {
        let mut conversation = Conversation::new();

        conversation.append_user("first");
        conversation.append_assistant("second");
        conversation.append_user("third");

        let roles: Vec<Role> = conversation
            .turns()
            .iter()
            .map(|turn| turn.role)
            .collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(conversation.turns()[2].text, "third");
    }

    #[test]
    fn visibility_changes_never_touch_the_transcript() {
        let mut conversation = Conversation::new();
        conversation.append_user("is my fern overwatered");
        conversation.append_assistant("Let the soil dry out between waterings.");
        let before = conversation.turns().to_vec();

        assert!(conversation.toggle_open());
        assert!(!conversation.toggle_open());
        assert!(conversation.toggle_open());
        conversation.close();
        conversation.close();

        assert_eq!(conversation.turns(), before.as_slice());
    }

    #[test]
    fn close_is_idempotent_and_panel_starts_closed() {
        let mut conversation = Conversation::new();
        assert!(!conversation.is_open());

        conversation.close();
        assert!(!conversation.is_open());

        conversation.toggle_open();
        conversation.close();
        conversation.close();
        assert!(!conversation.is_open());
    }
}
