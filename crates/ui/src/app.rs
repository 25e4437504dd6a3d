use std::sync::Arc;

use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable, ThemeMode,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex,
};
use leafdoctor_diagnosis::{DiagnosisBackend, HttpDiagnosisBackend};

use crate::assistant::AssistantWidget;
use crate::home::{HomePage, UploadRequested};
use crate::locale::strings;
use crate::settings::{AppSettings, SettingsChanged, SettingsState};

gpui::actions!(leafdoctor, [Quit]);

const HEADER_HEIGHT: Pixels = px(56.);
const WIDGET_MARGIN: Pixels = px(24.);

/// Root layout: header bar, scrollable home page, and the floating assistant
/// widget overlaid bottom-right.
pub struct AppShell {
    settings_state: Entity<SettingsState>,
    home: Entity<HomePage>,
    assistant: Entity<AssistantWidget>,
    home_scroll: ScrollHandle,
}

impl AppShell {
    pub fn new(
        settings_state: Entity<SettingsState>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let settings = settings_state.read(cx).settings();
        let backend: Arc<dyn DiagnosisBackend> =
            Arc::new(HttpDiagnosisBackend::new(settings.endpoint.clone()));

        let home = cx.new(|_| HomePage::new(settings.language));
        let assistant =
            cx.new(|cx| AssistantWidget::new(backend, settings.language, window, cx));

        cx.subscribe(&home, |_, _, event: &UploadRequested, _| {
            // The upload pipeline is an external collaborator; the shell only
            // records the interaction.
            tracing::info!(
                source = ?event.source,
                "image upload requested; delegated to the diagnosis flow"
            );
        })
        .detach();

        cx.subscribe_in(
            &settings_state,
            window,
            |this, _, event: &SettingsChanged, window, cx| {
                this.handle_settings_changed(event, window, cx);
            },
        )
        .detach();

        Self {
            settings_state,
            home,
            assistant,
            home_scroll: ScrollHandle::new(),
        }
    }

    fn handle_settings_changed(
        &mut self,
        event: &SettingsChanged,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        event.settings.apply_theme(None, cx);
        cx.refresh_windows();

        let language = event.settings.language;
        let backend: Arc<dyn DiagnosisBackend> =
            Arc::new(HttpDiagnosisBackend::new(event.settings.endpoint.clone()));

        self.home
            .update(cx, |home, cx| home.set_language(language, cx));
        self.assistant.update(cx, |assistant, cx| {
            assistant.set_backend(backend);
            assistant.set_language(language, window, cx);
        });

        cx.notify();
    }

    fn update_settings_with(
        &mut self,
        cx: &mut Context<Self>,
        mutate: impl FnOnce(&mut AppSettings),
    ) {
        let mut next = (*self.settings_state.read(cx).settings()).clone();
        mutate(&mut next);

        let result = self
            .settings_state
            .update(cx, |state, cx| state.update_settings(next, cx));
        if let Err(error) = result {
            tracing::warn!(error = %error, "failed to persist settings");
        }
    }

    fn toggle_language(&mut self, cx: &mut Context<Self>) {
        self.update_settings_with(cx, |settings| {
            settings.language = settings.language.toggled();
        });
    }

    fn toggle_theme(&mut self, cx: &mut Context<Self>) {
        self.update_settings_with(cx, |settings| {
            settings.theme_mode = if settings.theme_mode.is_dark() {
                ThemeMode::Light
            } else {
                ThemeMode::Dark
            };
        });
    }

    fn scroll_home_to_top(&mut self, cx: &mut Context<Self>) {
        self.home_scroll.set_offset(point(px(0.), px(0.)));
        cx.notify();
    }

    fn render_header(&self, settings: &AppSettings, cx: &mut Context<Self>) -> AnyElement {
        let theme = cx.theme();
        let copy = strings(settings.language);
        let theme_icon = if settings.theme_mode.is_dark() {
            IconName::Sun
        } else {
            IconName::Moon
        };

        h_flex()
            .id("app-header")
            .w_full()
            .h(HEADER_HEIGHT)
            .flex_shrink_0()
            .items_center()
            .justify_between()
            .px_4()
            .bg(theme.background)
            .border_b_1()
            .border_color(theme.border)
            .child(
                h_flex()
                    .id("header-logo")
                    .gap_2()
                    .items_center()
                    .cursor(CursorStyle::PointingHand)
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(|this, _, _window, cx| {
                            this.scroll_home_to_top(cx);
                        }),
                    )
                    .child(Label::new("🌿"))
                    .child(
                        Label::new(copy.app_title)
                            .text_lg()
                            .font_weight(FontWeight::BOLD),
                    ),
            )
            .child(
                h_flex()
                    .gap_2()
                    .items_center()
                    .child(
                        Button::new("language-toggle")
                            .ghost()
                            .small()
                            .child(copy.language_label)
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.toggle_language(cx);
                            })),
                    )
                    .child(
                        Button::new("theme-toggle")
                            .ghost()
                            .small()
                            .icon(theme_icon)
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.toggle_theme(cx);
                            })),
                    ),
            )
            .into_any_element()
    }
}

impl Render for AppShell {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let settings = self.settings_state.read(cx).settings();

        div()
            .size_full()
            .relative()
            .bg(theme.background)
            .child(
                v_flex()
                    .size_full()
                    .child(self.render_header(&settings, cx))
                    .child(
                        div()
                            .id("home-scroll")
                            .flex_1()
                            .min_h_0()
                            .overflow_y_scroll()
                            .track_scroll(&self.home_scroll)
                            .child(self.home.clone()),
                    ),
            )
            .child(
                div()
                    .absolute()
                    .bottom(WIDGET_MARGIN)
                    .right(WIDGET_MARGIN)
                    .child(self.assistant.clone()),
            )
    }
}
