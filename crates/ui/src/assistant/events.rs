/// Emitted by the composer when the user submits a non-blank draft.
///
/// `text` is the raw input value; the widget trims it before it becomes a
/// transcript turn and the outgoing request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub text: String,
}

impl Submit {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
