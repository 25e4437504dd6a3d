#![deny(unsafe_code)]

/// Plant-disease-diagnosis desktop UI.
///
/// A GPUI application composed of a header bar, a home/upload page, and a
/// floating assistant widget. The widget owns the conversation transcript and
/// talks to the remote diagnosis service through `leafdoctor-diagnosis`.
pub mod app;
/// The floating assistant widget and its conversation core.
pub mod assistant;
pub mod home;
/// Fixed English/Hindi display strings.
pub mod locale;
/// Settings persistence (endpoint, language, theme).
pub mod settings;
