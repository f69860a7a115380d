use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use shared::protocol::SUBMIT_REACTION_PATH;
use tracing::warn;
use url::Url;

use crate::SubmissionError;

pub const DEFAULT_SETTINGS_FILE: &str = "sigc.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub submit_path: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            submit_path: SUBMIT_REACTION_PATH.into(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    submit_path: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn endpoint(&self) -> Result<Url, SubmissionError> {
        let invalid = |source| SubmissionError::InvalidEndpoint {
            endpoint: format!("{}{}", self.server_url, self.submit_path),
            source,
        };
        Url::parse(&self.server_url)
            .and_then(|base| base.join(&self.submit_path))
            .map_err(invalid)
    }

    fn apply_file(&mut self, raw: &str) -> Result<(), toml::de::Error> {
        let file_cfg: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file_cfg.server_url {
            self.server_url = v;
        }
        if let Some(v) = file_cfg.submit_path {
            self.submit_path = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("SIGC_SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = var("APP__SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = var("APP__SUBMIT_PATH") {
            self.submit_path = v;
        }
        if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(parsed) => self.request_timeout_secs = parsed,
                Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECS"),
            }
        }
    }
}

/// Defaults, then `sigc.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Err(err) = settings.apply_file(&raw) {
            warn!(path = %path.display(), "ignoring unreadable settings file: {err}");
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    settings
}
