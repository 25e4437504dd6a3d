use gpui::*;
use gpui_component::Root;

use leafdoctor::app::{AppShell, Quit};
use leafdoctor::settings::SettingsState;

/// Application entry point.
///
/// Bootstraps the GPUI application with:
/// 1. Asset loading via gpui-component-assets
/// 2. gpui-component initialization (required for Root and themes)
/// 3. Theme applied from persisted settings
/// 4. Global action handlers
/// 5. Window creation with Root wrapper for gpui-component composition
fn main() {
    tracing_subscriber::fmt::init();

    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(|cx| {
        gpui_tokio_bridge::init(cx);

        // Required before any Root usage: sets up the theme system and
        // component registry.
        gpui_component::init(cx);

        let settings_state = SettingsState::new(cx);
        let settings = settings_state.read(cx).settings();
        settings.apply_theme(None, cx);

        cx.on_action(|_: &Quit, cx| {
            cx.quit();
        });

        cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

        // Spawn async window creation so all initialization is complete.
        cx.spawn(async move |cx| {
            cx.update(|cx| {
                let options = WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                        None,
                        size(px(1100.), px(760.)),
                        cx,
                    ))),
                    titlebar: Some(TitlebarOptions {
                        title: Some("AI Plant Doctor".into()),
                        ..Default::default()
                    }),
                    ..Default::default()
                };

                cx.open_window(options, |window, cx| {
                    let shell = cx.new(|cx| AppShell::new(settings_state, window, cx));

                    // Root is required by gpui-component for dialogs/sheets.
                    cx.new(|cx| Root::new(shell, window, cx))
                })
                .expect("failed to open main window");

                cx.activate(true);
            })
        })
        .detach();
    });
}
