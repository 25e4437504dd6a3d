use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use figment::{
    Figment,
    providers::{Format, Json, Serialized},
};
use gpui::*;
use gpui_component::{Theme, ThemeMode};
use leafdoctor_diagnosis::{DEFAULT_CHAT_ENDPOINT, Language};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snafu::{ResultExt, Snafu};

pub const SETTINGS_DIRECTORY_NAME: &str = "leafdoctor";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Persisted application preferences: the chat endpoint, the display
/// language, and the theme mode.
///
/// Conversation history is deliberately absent; transcripts live and die with
/// the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub language: Language,
    #[serde(
        default = "default_theme_mode",
        serialize_with = "serialize_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            language: Language::default(),
            theme_mode: default_theme_mode(),
        }
    }
}

impl AppSettings {
    pub fn normalized(mut self) -> Self {
        self.endpoint = if self.endpoint.trim().is_empty() {
            default_endpoint()
        } else {
            self.endpoint.trim().to_string()
        };

        self
    }

    pub fn apply_theme(&self, window: Option<&mut Window>, cx: &mut App) {
        Theme::change(self.theme_mode, window, cx);
    }
}

pub struct SettingsStore {
    settings: Arc<ArcSwap<AppSettings>>,
    config_path: PathBuf,
}

impl SettingsStore {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".leafdoctor"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn new(config_path: PathBuf) -> Self {
        let settings = Self::load_from_disk(&config_path);
        Self {
            settings: Arc::new(ArcSwap::from_pointee(settings)),
            config_path,
        }
    }

    pub fn load() -> Self {
        Self::new(Self::default_config_path())
    }

    pub fn settings(&self) -> Arc<AppSettings> {
        self.settings.load_full()
    }

    pub fn update(&self, settings: AppSettings) -> Result<(), SettingsError> {
        let normalized = settings.normalized();
        self.persist(&normalized)?;
        self.settings.store(Arc::new(normalized));
        Ok(())
    }

    fn load_from_disk(path: &PathBuf) -> AppSettings {
        if !path.exists() {
            tracing::info!("settings file not found at {:?}, using defaults", path);
            return AppSettings::default();
        }

        let figment =
            Figment::from(Serialized::defaults(AppSettings::default())).merge(Json::file(path));

        match figment.extract::<AppSettings>() {
            Ok(settings) => settings.normalized(),
            Err(error) => {
                tracing::warn!(
                    "failed to parse settings from {:?}: {}. using defaults",
                    path,
                    error
                );
                AppSettings::default()
            }
        }
    }

    fn persist(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).context(CreateDirSnafu {
                stage: "create-settings-directory",
                path: parent.to_path_buf(),
            })?;
        }

        let content = serde_json::to_string_pretty(settings).context(SerializeConfigSnafu {
            stage: "serialize-settings-json",
        })?;

        let temp_path = self.config_path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).context(WriteFileSnafu {
            stage: "write-temporary-settings-file",
            path: temp_path.clone(),
        })?;

        std::fs::rename(&temp_path, &self.config_path).context(RenameTempFileSnafu {
            stage: "rename-temporary-settings-file",
            from: temp_path,
            to: self.config_path.clone(),
        })?;

        tracing::info!("saved settings to {:?}", self.config_path);
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SettingsError {
    #[snafu(display("failed to create settings directory at {path:?} on `{stage}`: {source}"))]
    CreateDir {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("failed to serialize settings on `{stage}`: {source}"))]
    SerializeConfig {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("failed to write settings file at {path:?} on `{stage}`: {source}"))]
    WriteFile {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "failed to replace settings file from {from:?} to {to:?} on `{stage}`: {source}"
    ))]
    RenameTempFile {
        stage: &'static str,
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Entity wrapper so views can subscribe to settings changes.
pub struct SettingsState {
    store: SettingsStore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChanged {
    pub settings: AppSettings,
}

impl EventEmitter<SettingsChanged> for SettingsState {}

impl SettingsState {
    pub fn new(cx: &mut App) -> Entity<Self> {
        cx.new(|_| Self {
            store: SettingsStore::load(),
        })
    }

    pub fn settings(&self) -> Arc<AppSettings> {
        self.store.settings()
    }

    pub fn update_settings(
        &mut self,
        settings: AppSettings,
        cx: &mut Context<Self>,
    ) -> Result<(), SettingsError> {
        let normalized = settings.normalized();
        self.store.update(normalized.clone())?;
        cx.emit(SettingsChanged {
            settings: normalized,
        });
        cx.notify();
        Ok(())
    }
}

fn default_endpoint() -> String {
    DEFAULT_CHAT_ENDPOINT.to_string()
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Light
}

fn serialize_theme_mode<S>(value: &ThemeMode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.name())
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> Result<ThemeMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(parse_theme_mode(&value))
}

fn parse_theme_mode(value: &str) -> ThemeMode {
    if value.trim().eq_ignore_ascii_case("dark") {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_endpoint_normalizes_to_the_default() {
        let settings = AppSettings {
            endpoint: "   ".to_string(),
            ..AppSettings::default()
        }
        .normalized();

        assert_eq!(settings.endpoint, DEFAULT_CHAT_ENDPOINT);
    }

    #[test]
    fn theme_mode_parses_case_insensitively() {
        assert_eq!(parse_theme_mode("Dark"), ThemeMode::Dark);
        assert_eq!(parse_theme_mode("dark "), ThemeMode::Dark);
        assert_eq!(parse_theme_mode("light"), ThemeMode::Light);
        assert_eq!(parse_theme_mode("anything-else"), ThemeMode::Light);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = AppSettings {
            endpoint: "http://10.0.0.7:5000".to_string(),
            language: Language::Hi,
            theme_mode: ThemeMode::Dark,
        };

        let encoded = serde_json::to_string(&settings).expect("settings must serialize");
        let decoded: AppSettings =
            serde_json::from_str(&encoded).expect("settings must deserialize");

        assert_eq!(decoded, settings);
    }
}
