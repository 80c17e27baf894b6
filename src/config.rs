//! Configuration for the picker and its static host.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding [`PickerConfig::base_url`].
pub const BASE_URL_ENV: &str = "ROUTINE_PICKER_BASE_URL";
/// Environment variable overriding [`PickerConfig::storage_dir`].
pub const STORAGE_DIR_ENV: &str = "ROUTINE_PICKER_STORAGE_DIR";
/// Environment variable overriding [`PickerConfig::static_dir`].
pub const STATIC_DIR_ENV: &str = "ROUTINE_PICKER_STATIC_DIR";
/// Environment variable overriding [`PickerConfig::server_port`].
pub const PORT_ENV: &str = "ROUTINE_PICKER_PORT";

/// Default host port.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration shared by the catalog loader, the chat backend and the host.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Origin the page is served from; relative paths are joined onto it.
    pub base_url: String,
    /// Path of the catalog document.
    pub catalog_path: String,
    /// Path of the chat endpoint.
    pub chat_path: String,
    /// Directory holding persisted selection keys.
    pub storage_dir: PathBuf,
    /// Request timeout for catalog and chat calls.
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
    /// Connection timeout for catalog and chat calls.
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,
    /// Port the static host listens on.
    pub server_port: u16,
    /// Directory of page assets served by the static host.
    pub static_dir: PathBuf,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(DEFAULT_PORT),
            catalog_path: "products.json".to_string(),
            chat_path: "/api/chat".to_string(),
            storage_dir: PathBuf::from(".routine-picker"),
            request_timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
            server_port: DEFAULT_PORT,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl PickerConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from defaults overlaid with `ROUTINE_PICKER_*` variables.
    ///
    /// Values that fail to parse keep their default.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(port) = std::env::var(PORT_ENV).ok().and_then(|p| p.parse().ok()) {
            config.server_port = port;
            config.base_url = default_base_url(port);
        }
        if let Some(url) = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|u| Url::parse(u).is_ok())
        {
            config.base_url = url;
        }
        if let Ok(dir) = std::env::var(STORAGE_DIR_ENV) {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var(STATIC_DIR_ENV) {
            config.static_dir = PathBuf::from(dir);
        }

        config
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the catalog document path.
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<String>) -> Self {
        self.catalog_path = path.into();
        self
    }

    /// Set the chat endpoint path.
    #[must_use]
    pub fn with_chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = path.into();
        self
    }

    /// Set the storage directory.
    #[must_use]
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Set the static asset directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the static host port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.server_port = port;
        self
    }

    /// Resolve the catalog document URL.
    ///
    /// # Errors
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn catalog_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)?.join(&self.catalog_path)
    }

    /// Resolve the chat endpoint URL.
    ///
    /// # Errors
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn chat_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)?.join(&self.chat_path)
    }
}

fn default_base_url(port: u16) -> String {
    format!("http://127.0.0.1:{port}/")
}

/// Serde module for Duration serialization.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PickerConfig::default();
        assert_eq!(config.catalog_path, "products.json");
        assert_eq!(config.chat_path, "/api/chat");
        assert_eq!(config.server_port, DEFAULT_PORT);
        assert_eq!(config.base_url, "http://127.0.0.1:3000/");
    }

    #[test]
    fn test_config_builder() {
        let config = PickerConfig::new()
            .with_base_url("http://shop.test/picker/")
            .with_catalog_path("data/products.json")
            .with_timeout(Duration::from_secs(5))
            .with_port(8080);

        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.server_port, 8080);
        assert_eq!(
            config.catalog_url().unwrap().as_str(),
            "http://shop.test/picker/data/products.json"
        );
        assert_eq!(config.chat_url().unwrap().as_str(), "http://shop.test/api/chat");
    }

    #[test]
    fn test_timeouts_serialize_as_seconds() {
        let config = PickerConfig::default().with_timeout(Duration::from_secs(42));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["request_timeout"], 42);

        let back: PickerConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.request_timeout, Duration::from_secs(42));
    }
}
