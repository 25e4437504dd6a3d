use std::sync::Arc;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    label::Label,
    v_flex,
};
use gpui_tokio_bridge::Tokio;
use leafdoctor_diagnosis::{ChatRequest, DiagnosisBackend, Language};

use crate::assistant::composer::Composer;
use crate::assistant::conversation::Conversation;
use crate::assistant::events::Submit;
use crate::assistant::transcript_list::TranscriptList;
use crate::locale::{ASSISTANT_TITLE, strings};

const PANEL_WIDTH: Pixels = px(380.);
const PANEL_HEIGHT: Pixels = px(440.);

/// Picks the fixed apology string appended when a send attempt fails.
fn fallback_reply(language: Language) -> &'static str {
    strings(language).assistant_apology
}

/// Floating plant-care assistant.
///
/// Owns the conversation state and turns each submitted draft into exactly
/// one request/response exchange with the diagnosis service. A failed
/// exchange degrades to a localized apology turn; the conversation stays
/// usable afterwards.
pub struct AssistantWidget {
    conversation: Conversation,
    transcript_list: Entity<TranscriptList>,
    composer: Entity<Composer>,
    backend: Arc<dyn DiagnosisBackend>,
    language: Language,
}

impl AssistantWidget {
    pub fn new(
        backend: Arc<dyn DiagnosisBackend>,
        language: Language,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let transcript_list = cx.new(TranscriptList::new);
        let composer = cx.new(|cx| Composer::new(language, window, cx));

        cx.subscribe(&composer, |this, _, event: &Submit, cx| {
            this.handle_submit(event.clone(), cx);
        })
        .detach();

        Self {
            conversation: Conversation::new(),
            transcript_list,
            composer,
            backend,
            language,
        }
    }

    pub fn is_open(&self) -> bool {
        self.conversation.is_open()
    }

    pub fn toggle_open(&mut self, cx: &mut Context<Self>) {
        let opened = self.conversation.toggle_open();
        if opened {
            self.transcript_list
                .update(cx, |list, cx| list.scroll_to_latest(cx));
        }
        cx.notify();
    }

    pub fn close(&mut self, cx: &mut Context<Self>) {
        self.conversation.close();
        cx.notify();
    }

    pub fn set_language(&mut self, language: Language, window: &mut Window, cx: &mut Context<Self>) {
        if self.language == language {
            return;
        }

        self.language = language;
        self.composer.update(cx, |composer, cx| {
            composer.set_language(language, window, cx);
        });
        cx.notify();
    }

    /// Swaps the diagnosis backend; in-flight sends keep the backend they
    /// were dispatched with.
    pub fn set_backend(&mut self, backend: Arc<dyn DiagnosisBackend>) {
        self.backend = backend;
    }

    fn handle_submit(&mut self, event: Submit, cx: &mut Context<Self>) {
        let outgoing = event.text.trim().to_string();
        if !self.conversation.append_user(&outgoing) {
            return;
        }

        self.sync_transcript(cx);
        self.dispatch_send(outgoing, cx);
    }

    /// Issues one request for `message` and appends exactly one assistant
    /// turn when it resolves.
    ///
    /// Each dispatch is an independent detached task, so a second submit
    /// while the first is pending proceeds on its own; replies append in
    /// arrival order.
    fn dispatch_send(&mut self, message: String, cx: &mut Context<Self>) {
        let language = self.language;
        let backend = self.backend.clone();
        let request = ChatRequest::new(message, language);
        let call = Tokio::spawn(cx, async move { backend.send_chat(request).await });

        cx.spawn(async move |this, cx| {
            let reply = match call.await {
                Ok(Ok(reply)) => reply.reply,
                Ok(Err(error)) => {
                    tracing::warn!(error = %error, "chat request failed; substituting apology");
                    fallback_reply(language).to_string()
                }
                Err(join_error) => {
                    tracing::error!(error = %join_error, "chat task aborted; substituting apology");
                    fallback_reply(language).to_string()
                }
            };

            let _ = this.update(cx, |this, cx| {
                this.conversation.append_assistant(reply);
                this.sync_transcript(cx);
                cx.notify();
            });
        })
        .detach();
    }

    fn sync_transcript(&mut self, cx: &mut Context<Self>) {
        let turns = self.conversation.turns().to_vec();
        self.transcript_list
            .update(cx, |list, cx| list.set_turns(turns, cx));
    }

    fn render_panel(&self, cx: &mut Context<Self>) -> AnyElement {
        let theme = cx.theme();

        v_flex()
            .id("assistant-panel")
            .w(PANEL_WIDTH)
            .h(PANEL_HEIGHT)
            .rounded_lg()
            .border_1()
            .border_color(theme.border)
            .bg(theme.background)
            .shadow_lg()
            .overflow_hidden()
            .child(
                div()
                    .w_full()
                    .px_3()
                    .py_2()
                    .border_b_1()
                    .border_color(theme.border)
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(Label::new(ASSISTANT_TITLE).font_weight(FontWeight::SEMIBOLD))
                    .child(
                        Button::new("assistant-close")
                            .ghost()
                            .small()
                            .child("Close")
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.close(cx);
                            })),
                    ),
            )
            .child(
                div()
                    .flex_1()
                    .min_h_0()
                    .child(self.transcript_list.clone()),
            )
            .child(
                div()
                    .flex_shrink_0()
                    .w_full()
                    .border_t_1()
                    .border_color(theme.border)
                    .child(self.composer.clone()),
            )
            .into_any_element()
    }
}

impl Render for AssistantWidget {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let is_open = self.conversation.is_open();
        let toggle_icon = if is_open {
            IconName::CircleX
        } else {
            IconName::Bot
        };

        v_flex()
            .id("assistant-widget")
            .items_end()
            .gap_3()
            .when(is_open, |this| this.child(self.render_panel(cx)))
            .child(
                Button::new("assistant-toggle")
                    .primary()
                    .icon(toggle_icon)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.toggle_open(cx);
                    })),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_reply_is_selected_by_language() {
        assert_eq!(
            fallback_reply(Language::En),
            "Server error. Please try again."
        );
        assert_eq!(
            fallback_reply(Language::Hi),
            "सर्वर त्रुटि, कृपया पुनः प्रयास करें।"
        );
    }
}
