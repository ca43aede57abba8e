use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::position::Canvas;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Coordinate space of annotation boxes, also used as PlayResX/PlayResY
    #[serde(default)]
    pub canvas: Canvas,

    /// Annotation download settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Directory the .ass file is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Also keep the downloaded XML next to the output
    #[serde(default)]
    pub save_source_xml: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Annotation download configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FetchConfig {
    // @field: Annotation service URL, queried with feat and video_id
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: User-Agent header sent with the request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    "http://youtube.com/annotations/read2".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("youtube-ass/{}", env!("CARGO_PKG_VERSION"))
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.canvas.width), ("height", self.canvas.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(anyhow!("Canvas {} must be a positive number, got {}", name, value));
            }
        }

        url::Url::parse(&self.fetch.endpoint)
            .with_context(|| format!("Invalid annotation endpoint: {}", self.fetch.endpoint))?;

        if self.fetch.timeout_secs == 0 {
            return Err(anyhow!("Fetch timeout must be at least one second"));
        }

        if self.output_dir.trim().is_empty() {
            return Err(anyhow!("Output directory must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            canvas: Canvas::default(),
            fetch: FetchConfig::default(),
            output_dir: default_output_dir(),
            save_source_xml: false,
            log_level: LogLevel::default(),
        }
    }
}
