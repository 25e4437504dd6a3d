use gpui::*;
use gpui_component::{
    ActiveTheme, Icon, IconName,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex,
};
use leafdoctor_diagnosis::Language;

use crate::locale::strings;

/// Where the user asked to pick an image from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadSource {
    Gallery,
    Camera,
}

/// Emitted when the user starts the image-upload flow. The flow itself is an
/// external collaborator; this view only reports the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadRequested {
    pub source: UploadSource,
}

const FEATURE_ICONS: [IconName; 3] = [IconName::Bot, IconName::Info, IconName::CircleUser];

/// Landing page: hero copy, results showcase, upload actions, feature cards.
pub struct HomePage {
    language: Language,
}

impl EventEmitter<UploadRequested> for HomePage {}

impl HomePage {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn set_language(&mut self, language: Language, cx: &mut Context<Self>) {
        if self.language == language {
            return;
        }

        self.language = language;
        cx.notify();
    }

    fn request_upload(&mut self, source: UploadSource, cx: &mut Context<Self>) {
        cx.emit(UploadRequested { source });
    }

    fn render_hero(&self, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();
        let copy = strings(self.language);

        v_flex()
            .items_center()
            .gap_3()
            .child(
                Label::new(copy.app_title)
                    .text_2xl()
                    .font_weight(FontWeight::BOLD)
                    .text_color(theme.primary),
            )
            .child(
                div()
                    .max_w(px(560.))
                    .text_color(theme.muted_foreground)
                    .child(Label::new(copy.subtitle)),
            )
            .into_any_element()
    }

    fn render_results_card(&self, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();
        let copy = strings(self.language);

        v_flex()
            .w_full()
            .max_w(px(720.))
            .items_center()
            .gap_4()
            .p_4()
            .rounded_lg()
            .border_1()
            .border_color(theme.border)
            .bg(theme.muted)
            .child(Label::new(copy.real_results).font_weight(FontWeight::SEMIBOLD))
            .child(
                h_flex()
                    .w_full()
                    .gap_4()
                    .child(Self::render_result_panel("Before: Diseased Leaf", cx))
                    .child(Self::render_result_panel("After: Recovered Plant", cx)),
            )
            .into_any_element()
    }

    fn render_result_panel(caption: &'static str, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();

        div()
            .flex_1()
            .h(px(120.))
            .rounded_lg()
            .border_1()
            .border_color(theme.border)
            .bg(theme.background)
            .flex()
            .items_center()
            .justify_center()
            .child(
                Label::new(caption)
                    .text_sm()
                    .text_color(theme.muted_foreground),
            )
            .into_any_element()
    }

    fn render_upload_actions(&self, cx: &mut Context<Self>) -> AnyElement {
        let copy = strings(self.language);

        h_flex()
            .gap_4()
            .child(
                Button::new("upload-image")
                    .primary()
                    .child(copy.upload_button)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.request_upload(UploadSource::Gallery, cx);
                    })),
            )
            .child(
                Button::new("take-photo")
                    .ghost()
                    .child(copy.camera_button)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.request_upload(UploadSource::Camera, cx);
                    })),
            )
            .into_any_element()
    }

    fn render_feature_cards(&self, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();
        let copy = strings(self.language);

        h_flex()
            .w_full()
            .max_w(px(720.))
            .gap_4()
            .children(copy.features.iter().zip(FEATURE_ICONS).map(
                |(feature, icon)| {
                    v_flex()
                        .flex_1()
                        .gap_2()
                        .p_4()
                        .rounded_lg()
                        .border_1()
                        .border_color(theme.border)
                        .bg(theme.background)
                        .child(Icon::new(icon).text_color(theme.primary))
                        .child(Label::new(feature.title).font_weight(FontWeight::SEMIBOLD))
                        .child(
                            Label::new(feature.detail)
                                .text_sm()
                                .text_color(theme.muted_foreground),
                        )
                },
            ))
            .into_any_element()
    }
}

impl Render for HomePage {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        v_flex()
            .w_full()
            .items_center()
            .gap_8()
            .p_8()
            .child(self.render_hero(cx))
            .child(self.render_results_card(cx))
            .child(self.render_upload_actions(cx))
            .child(self.render_feature_cards(cx))
    }
}
