use std::{collections::HashMap, fs};

use shared::protocol::SEARCH_PATH;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SERVICE_URL: &str = "https://team-server-0oy2.onrender.com";
pub const SETTINGS_FILE: &str = "search.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid service url '{value}': {source}")]
    InvalidServiceUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("service url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("failed to parse {path}: {source}")]
    File {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub service_url: Url,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            service_url: Url::parse(DEFAULT_SERVICE_URL)
                .unwrap_or_else(|err| panic!("default service url must parse: {err}")),
        }
    }
}

impl ClientSettings {
    /// Layers the settings file and environment over the defaults. Later
    /// sources win: `search.toml`, then `SEARCH_SERVICE_URL`, then
    /// `APP__SERVICE_URL`.
    pub fn from_sources(
        file_contents: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        if let Some(raw) = file_contents {
            let file_cfg = toml::from_str::<HashMap<String, String>>(raw).map_err(|source| {
                SettingsError::File {
                    path: SETTINGS_FILE.to_string(),
                    source,
                }
            })?;
            if let Some(v) = file_cfg.get("service_url") {
                settings.service_url = parse_service_url(v)?;
            }
        }

        if let Some(v) = env("SEARCH_SERVICE_URL") {
            settings.service_url = parse_service_url(&v)?;
        }
        if let Some(v) = env("APP__SERVICE_URL") {
            settings.service_url = parse_service_url(&v)?;
        }

        Ok(settings)
    }

    pub fn with_service_url(mut self, value: &str) -> Result<Self, SettingsError> {
        self.service_url = parse_service_url(value)?;
        Ok(self)
    }

    /// `<service_url>/search`. A base path without a trailing slash is kept
    /// rather than replaced.
    pub fn search_endpoint(&self) -> Result<Url, SettingsError> {
        let mut base = self.service_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(SEARCH_PATH)
            .map_err(|source| SettingsError::InvalidServiceUrl {
                value: self.service_url.to_string(),
                source,
            })
    }
}

pub fn parse_service_url(value: &str) -> Result<Url, SettingsError> {
    let trimmed = value.trim();
    let url = Url::parse(trimmed).map_err(|source| SettingsError::InvalidServiceUrl {
        value: trimmed.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(SettingsError::UnsupportedScheme(trimmed.to_string()));
    }
    Ok(url)
}

pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    let file_contents = fs::read_to_string(SETTINGS_FILE).ok();
    ClientSettings::from_sources(file_contents.as_deref(), |name| {
        std::env::var(name)
            .ok()
            .filter(|value| !value.trim().is_empty())
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
