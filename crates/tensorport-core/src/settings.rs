//! Explicit configuration structs.
//!
//! [`ServerSettings`] is constructed once in `main` and passed into the
//! data plane; nothing in the workspace reads ambient global state.
//! [`ModelSettings`] mirrors the `model-settings.json` file that sits
//! next to each model artifact in the repository.

use crate::error::{ServeError, ServeResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Per-model parameters from `model-settings.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Location of the model artifact (file or directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Artifact format hint, when the adapter supports more than one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Adapter-specific extras, passed through uninterpreted.
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

/// Configuration for a single model: identity, adapter kind, parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Adapter kind tag, e.g. `"tensorport.dummy"`. Resolved against the
    /// adapter catalog at registration time.
    pub implementation: String,
    #[serde(default)]
    pub parameters: ModelParameters,
}

impl ModelSettings {
    pub fn new(name: impl Into<String>, implementation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            implementation: implementation.into(),
            parameters: ModelParameters::default(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.parameters.uri = Some(uri.into());
        self
    }

    /// Parse a `model-settings.json` payload.
    pub fn from_json(bytes: &[u8]) -> ServeResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| ServeError::Load(format!("invalid model settings: {e}")))
    }

    /// Artifact location, falling back to the directory the settings file
    /// was found in when `uri` is omitted.
    pub fn resolved_uri(&self, settings_dir: Option<&Path>) -> Option<PathBuf> {
        match (&self.parameters.uri, settings_dir) {
            (Some(uri), Some(dir)) if Path::new(uri).is_relative() => Some(dir.join(uri)),
            (Some(uri), _) => Some(PathBuf::from(uri)),
            (None, Some(dir)) => Some(dir.to_path_buf()),
            (None, None) => None,
        }
    }
}

/// Server-wide configuration, built in `main` and passed to the data plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub server_name: String,
    pub server_version: String,
    pub host: String,
    pub port: u16,
    /// Root directory scanned for `model-settings.json` files at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_repository_root: Option<PathBuf>,
    /// Default predict deadline applied when a request carries no
    /// `timeout_ms` parameter.
    pub default_deadline_ms: u64,
    #[serde(default)]
    pub debug: bool,
    /// Protocol extensions advertised in server metadata.
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            server_name: "tensorport".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            model_repository_root: None,
            default_deadline_ms: 60_000,
            debug: false,
            extensions: Vec::new(),
        }
    }
}

impl ServerSettings {
    /// Build settings from environment variables, starting from defaults.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TENSORPORT_HOST` | `0.0.0.0` |
    /// | `TENSORPORT_PORT` | `8080` |
    /// | `TENSORPORT_MODEL_REPOSITORY` | *(none)* |
    /// | `TENSORPORT_DEFAULT_DEADLINE_MS` | `60000` |
    /// | `TENSORPORT_DEBUG` | `false` |
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(host) = std::env::var("TENSORPORT_HOST") {
            settings.host = host;
        }
        if let Some(port) = std::env::var("TENSORPORT_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            settings.port = port;
        }
        if let Ok(root) = std::env::var("TENSORPORT_MODEL_REPOSITORY") {
            if !root.trim().is_empty() {
                settings.model_repository_root = Some(PathBuf::from(root));
            }
        }
        if let Some(deadline) = std::env::var("TENSORPORT_DEFAULT_DEADLINE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            settings.default_deadline_ms = deadline;
        }
        if let Ok(debug) = std::env::var("TENSORPORT_DEBUG") {
            settings.debug = matches!(debug.as_str(), "1" | "true" | "TRUE");
        }
        settings
    }
}
