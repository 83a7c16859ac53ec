//! Optional RON configuration for the terminal host.
//!
//! Looked up at `$GEOCHAT_CONFIG`, falling back to `./geochat.ron`. A missing
//! file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use geochat_client::ClientSettings;
use geochat_core::{ChatCopy, ChatSettings, LngLat, MapControl, MapSettings};
use geochat_logging::geochat_info;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const CONFIG_ENV: &str = "GEOCHAT_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "geochat.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub endpoint_path: String,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
    pub map: MapConfig,
    pub copy: CopyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// `(longitude, latitude)`.
    pub center: (f64, f64),
    pub zoom: u8,
    pub toolbar: bool,
    pub scale: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    pub pending: String,
    pub summary_prefix: String,
    pub separator: String,
    pub no_locations: String,
    pub failure: String,
    pub superseded_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            backend_url: client.base_url,
            endpoint_path: client.endpoint_path,
            request_timeout_secs: client.request_timeout.map(|timeout| timeout.as_secs()),
            max_response_bytes: client.max_bytes,
            log_destination: LogDestination::File,
            map: MapConfig::default(),
            copy: CopyConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        let map = MapSettings::default();
        Self {
            center: (map.center.lng, map.center.lat),
            zoom: map.zoom,
            toolbar: map.controls.contains(&MapControl::ToolBar),
            scale: map.controls.contains(&MapControl::Scale),
        }
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        let copy = ChatCopy::default();
        Self {
            pending: copy.pending,
            summary_prefix: copy.summary_prefix,
            separator: copy.separator,
            no_locations: copy.no_locations,
            failure: copy.failure,
            superseded_prefix: copy.superseded_prefix,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: AppConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        config.validate()?;
        geochat_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.client_settings()
            .endpoint()
            .map_err(|err| ConfigError::Invalid(format!("backend endpoint: {err}")))?;

        let (lng, lat) = self.map.center;
        if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
            return Err(ConfigError::Invalid(format!(
                "map center ({lng}, {lat}) out of range"
            )));
        }
        if !(2..=20).contains(&self.map.zoom) {
            return Err(ConfigError::Invalid(format!(
                "map zoom {} outside 2..=20",
                self.map.zoom
            )));
        }
        if self.max_response_bytes == 0 {
            return Err(ConfigError::Invalid("max_response_bytes must be positive".into()));
        }
        Ok(())
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.backend_url.clone(),
            endpoint_path: self.endpoint_path.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn chat_settings(&self) -> ChatSettings {
        let mut controls = Vec::with_capacity(2);
        if self.map.toolbar {
            controls.push(MapControl::ToolBar);
        }
        if self.map.scale {
            controls.push(MapControl::Scale);
        }
        ChatSettings {
            copy: ChatCopy {
                pending: self.copy.pending.clone(),
                summary_prefix: self.copy.summary_prefix.clone(),
                separator: self.copy.separator.clone(),
                no_locations: self.copy.no_locations.clone(),
                failure: self.copy.failure.clone(),
                superseded_prefix: self.copy.superseded_prefix.clone(),
            },
            map: MapSettings {
                center: LngLat::new(self.map.center.0, self.map.center.1),
                zoom: self.map.zoom,
                controls,
            },
        }
    }
}
