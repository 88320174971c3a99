//! Front-end configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{DEFAULT_DISPLAY_MS, DEFAULT_FADE_MS, NotificationTiming, ROOT_PATH};

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_STATE_DIR: &str = ".frontend-state";

/// Configuration values for the front-end core.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FRONTEND")]
pub struct FrontendSettings {
    /// Base URL of the dispensing backend.
    pub api_base_url: Option<String>,
    /// Directory holding the persisted identity entries.
    pub state_dir: Option<PathBuf>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
    /// How long a notification stays visible, in milliseconds.
    pub notification_display_ms: Option<u64>,
    /// Fade-out time after the display window, in milliseconds.
    pub notification_fade_ms: Option<u64>,
    /// Path the shell opens on start-up.
    pub start_path: Option<String>,
}

impl FrontendSettings {
    /// Return the configured backend URL, falling back to the local default.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured value is not a URL.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Return the configured state directory, falling back to the default.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
    }

    /// Return the request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Return the notification display and fade windows.
    pub fn notification_timing(&self) -> NotificationTiming {
        NotificationTiming::from_millis(
            self.notification_display_ms.unwrap_or(DEFAULT_DISPLAY_MS),
            self.notification_fade_ms.unwrap_or(DEFAULT_FADE_MS),
        )
    }

    /// Return the start-up path, falling back to the authenticated root.
    pub fn start_path(&self) -> &str {
        self.start_path.as_deref().unwrap_or(ROOT_PATH)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for front-end configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 6] = [
        "FRONTEND_API_BASE_URL",
        "FRONTEND_STATE_DIR",
        "FRONTEND_REQUEST_TIMEOUT_SECS",
        "FRONTEND_NOTIFICATION_DISPLAY_MS",
        "FRONTEND_NOTIFICATION_FADE_MS",
        "FRONTEND_START_PATH",
    ];

    fn load_from_empty_args() -> FrontendSettings {
        FrontendSettings::load_from_iter([OsString::from("frontend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("default parses").as_str(),
            "http://localhost:5000/"
        );
        assert_eq!(settings.state_dir(), PathBuf::from(DEFAULT_STATE_DIR));
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.notification_timing(), NotificationTiming::default());
        assert_eq!(settings.start_path(), "/TelaPadrao");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("FRONTEND_API_BASE_URL", Some("http://api.local:8080".to_owned())),
            ("FRONTEND_STATE_DIR", Some("/tmp/frontend-state".to_owned())),
            ("FRONTEND_REQUEST_TIMEOUT_SECS", Some("3".to_owned())),
            ("FRONTEND_NOTIFICATION_DISPLAY_MS", Some("1000".to_owned())),
            ("FRONTEND_NOTIFICATION_FADE_MS", Some("50".to_owned())),
            ("FRONTEND_START_PATH", Some("/Login".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("parses").as_str(),
            "http://api.local:8080/"
        );
        assert_eq!(settings.state_dir(), PathBuf::from("/tmp/frontend-state"));
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
        assert_eq!(
            settings.notification_timing(),
            NotificationTiming::from_millis(1_000, 50)
        );
        assert_eq!(settings.start_path(), "/Login");
    }

    #[rstest]
    fn invalid_base_url_is_reported() {
        let settings = FrontendSettings {
            api_base_url: Some("not a url".to_owned()),
            state_dir: None,
            request_timeout_secs: 10,
            notification_display_ms: None,
            notification_fade_ms: None,
            start_path: None,
        };
        assert!(settings.api_base_url().is_err());
    }
}
