//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::api::client::{ApiSettings, API_BASE, DEFAULT_APP_ID, GRAPHQL_BASE};
use crate::error::{Error, Result};
use crate::export::ExportOptions;
use crate::output::progress::{BarOptions, DEFAULT_BAR_LENGTH, DEFAULT_FILL};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Request identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Optional `sessionid` cookie of a logged-in browser session.
    #[serde(default)]
    pub session_id: Option<String>,

    /// Web app id sent with every API request.
    #[serde(default = "default_app_id")]
    pub app_id: String,
}

/// Export and display options.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for link files and profile folders.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Whether to draw progress bars.
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Whether to log each saved file.
    #[serde(default = "default_true")]
    pub show_downloads: bool,

    /// Progress bar width in segments.
    #[serde(default = "default_bar_length")]
    pub bar_length: usize,

    /// Progress bar fill character.
    #[serde(default = "default_bar_fill")]
    pub bar_fill: char,

    /// HTTP request timeout.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,

    /// Random pause between downloads in milliseconds, `[min, max]`.
    #[serde(default = "default_download_delay")]
    pub download_delay_ms: (u64, u64),

    /// Profile metadata host.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// GraphQL pagination host.
    #[serde(default = "default_graphql_base")]
    pub graphql_base: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            session_id: None,
            app_id: default_app_id(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            show_progress: true,
            show_downloads: true,
            bar_length: DEFAULT_BAR_LENGTH,
            bar_fill: DEFAULT_FILL,
            request_timeout_seconds: default_timeout(),
            download_delay_ms: default_download_delay(),
            api_base: default_api_base(),
            graphql_base: default_graphql_base(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36".to_string()
}

fn default_app_id() -> String {
    DEFAULT_APP_ID.to_string()
}

fn default_true() -> bool {
    true
}

fn default_bar_length() -> usize {
    DEFAULT_BAR_LENGTH
}

fn default_bar_fill() -> char {
    DEFAULT_FILL
}

fn default_timeout() -> u64 {
    30
}

fn default_download_delay() -> (u64, u64) {
    (400, 750)
}

fn default_api_base() -> String {
    API_BASE.to_string()
}

fn default_graphql_base() -> String {
    GRAPHQL_BASE.to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Settings for the API client and media fetcher.
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            api_base: self.options.api_base.clone(),
            graphql_base: self.options.graphql_base.clone(),
            app_id: self.session.app_id.clone(),
            user_agent: self.session.user_agent.clone(),
            session_id: self.session.session_id.clone(),
            timeout: Duration::from_secs(self.options.request_timeout_seconds),
        }
    }

    /// Progress bar appearance.
    pub fn bar_options(&self) -> BarOptions {
        BarOptions {
            length: self.options.bar_length,
            fill: self.options.bar_fill,
            visible: self.options.show_progress,
            ..Default::default()
        }
    }

    /// Options shared by all export operations.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            output_dir: self.download_directory(),
            bar: self.bar_options(),
            download_delay_ms: self.options.download_delay_ms,
            show_downloads: self.options.show_downloads,
        }
    }
}
