use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    input::{Input, InputEvent, InputState},
    v_flex,
};
use leafdoctor_diagnosis::Language;

use crate::assistant::events::Submit;
use crate::locale::strings;

/// What an incoming enter keypress should do to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnterOutcome {
    /// Plain Enter: submit the draft.
    Submit,
    /// Synthetic Enter following a Shift+Enter newline: swallow it.
    ConsumeNewline,
    /// Secondary Enter (platform modifier): leave the draft alone.
    Ignore,
}

fn enter_outcome(secondary: bool, pending_newline: bool) -> EnterOutcome {
    if secondary {
        EnterOutcome::Ignore
    } else if pending_newline {
        EnterOutcome::ConsumeNewline
    } else {
        EnterOutcome::Submit
    }
}

/// Draft input for the assistant widget.
///
/// Owns the uncommitted draft text. Enter submits, Shift+Enter inserts a
/// literal newline, and blank drafts never leave this component.
pub struct Composer {
    input_state: Entity<InputState>,
    _input_subscription: Subscription,
    language: Language,
    pending_newline: bool,
}

impl EventEmitter<Submit> for Composer {}

impl Composer {
    pub fn new(language: Language, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let (input_state, input_subscription) = Self::build_input(language, window, cx);

        Self {
            input_state,
            _input_subscription: input_subscription,
            language,
            pending_newline: false,
        }
    }

    fn build_input(
        language: Language,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> (Entity<InputState>, Subscription) {
        let input_state = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder(strings(language).assistant_placeholder)
                .clean_on_escape()
                .auto_grow(1, 6)
        });

        let subscription = cx.subscribe_in(
            &input_state,
            window,
            |this, _, event: &InputEvent, window, cx| {
                if let InputEvent::PressEnter { secondary } = event {
                    match enter_outcome(*secondary, this.pending_newline) {
                        EnterOutcome::Submit => {
                            this.trim_trailing_newline(window, cx);
                            this.handle_submit(window, cx);
                        }
                        EnterOutcome::ConsumeNewline | EnterOutcome::Ignore => {
                            this.pending_newline = false;
                        }
                    }
                }
            },
        );

        (input_state, subscription)
    }

    /// Swaps the placeholder language, carrying the current draft over.
    pub fn set_language(&mut self, language: Language, window: &mut Window, cx: &mut Context<Self>) {
        if self.language == language {
            return;
        }

        self.language = language;
        let draft = self.input_state.read(cx).value().to_string();
        let (input_state, input_subscription) = Self::build_input(language, window, cx);
        self.input_state = input_state;
        self._input_subscription = input_subscription;

        if !draft.is_empty() {
            self.input_state.update(cx, |state, cx| {
                state.set_value(draft, window, cx);
            });
        }

        self.pending_newline = false;
        cx.notify();
    }

    fn clear(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            state.set_value("", window, cx);
        });
        self.pending_newline = false;
    }

    fn handle_shift_enter(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        // Shift+Enter inserts the newline manually and then still produces a
        // PressEnter event; flagging it here lets the subscription swallow
        // that synthetic enter instead of submitting.
        self.pending_newline = true;
        self.input_state.update(cx, |state, cx| {
            state.insert("\n", window, cx);
        });
        cx.notify();
    }

    fn trim_trailing_newline(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            let value = state.value().to_string();
            if let Some(trimmed) = value.strip_suffix('\n') {
                state.set_value(trimmed.to_string(), window, cx);
            }
        });
    }

    fn handle_submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let draft = self.input_state.read(cx).value().to_string();
        if draft.trim().is_empty() {
            return;
        }

        cx.emit(Submit::new(draft));
        // The draft resets as soon as the send is dispatched, regardless of
        // how the network call ends.
        self.clear(window, cx);
    }
}

impl Render for Composer {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .bg(theme.background)
            .gap_2()
            .p_2()
            .child(
                div()
                    .w_full()
                    .px_2()
                    .py_1()
                    .rounded_lg()
                    .border_1()
                    .border_color(theme.border)
                    .bg(theme.background)
                    .on_key_down(cx.listener(|this, event: &KeyDownEvent, window, cx| {
                        if event.keystroke.key == "enter" && event.keystroke.modifiers.shift {
                            this.handle_shift_enter(window, cx);
                        }
                    }))
                    .child(Input::new(&self.input_state).w_full()),
            )
            .child(
                div().w_full().flex().justify_end().child(
                    Button::new("assistant-send")
                        .small()
                        .primary()
                        .icon(IconName::ArrowUp)
                        .child("Send")
                        .on_click(cx.listener(|this, _, window, cx| {
                            this.handle_submit(window, cx);
                        })),
                ),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_enter_submits() {
        assert_eq!(enter_outcome(false, false), EnterOutcome::Submit);
    }

    #[test]
    fn enter_after_shift_enter_newline_is_swallowed() {
        assert_eq!(enter_outcome(false, true), EnterOutcome::ConsumeNewline);
    }

    #[test]
    fn secondary_enter_never_submits() {
        assert_eq!(enter_outcome(true, false), EnterOutcome::Ignore);
        assert_eq!(enter_outcome(true, true), EnterOutcome::Ignore);
    }
}
