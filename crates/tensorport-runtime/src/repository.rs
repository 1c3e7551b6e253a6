//! Model repository bootstrap.
//!
//! Walks a repository root for `model-settings.json` files, resolves each
//! model's adapter factory from the catalog, registers it, and loads it.
//! Individual load failures are recorded in the registry and logged;
//! they do not abort startup.

use crate::registry::ModelRegistry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tensorport_core::{AdapterFactory, ModelIdentity, ModelSettings, ServeError, ServeResult};
use tracing::{error, info, warn};

/// File name looked for in each repository directory.
pub const MODEL_SETTINGS_FILENAME: &str = "model-settings.json";

/// Catalog of available adapter factories, keyed by implementation tag.
#[derive(Default)]
pub struct AdapterCatalog {
    factories: HashMap<String, Arc<dyn AdapterFactory>>,
}

impl AdapterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factory(mut self, factory: Arc<dyn AdapterFactory>) -> Self {
        self.register(factory);
        self
    }

    pub fn register(&mut self, factory: Arc<dyn AdapterFactory>) {
        self.factories.insert(factory.kind().to_string(), factory);
    }

    /// Look up a factory, failing fast when the implementation tag has
    /// no registered runtime.
    pub fn get(&self, kind: &str) -> ServeResult<Arc<dyn AdapterFactory>> {
        self.factories.get(kind).cloned().ok_or_else(|| {
            ServeError::Load(format!(
                "no adapter registered for implementation '{kind}'"
            ))
        })
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

/// Scan `root` recursively, registering and loading every model found.
///
/// Returns the number of models that reached Ready. Settings files that
/// cannot be parsed, unknown implementations, and load failures are
/// logged and skipped.
pub async fn load_repository(
    root: &Path,
    catalog: &AdapterCatalog,
    registry: &ModelRegistry,
) -> ServeResult<usize> {
    if !root.is_dir() {
        return Err(ServeError::Load(format!(
            "model repository '{}' is not a directory",
            root.display()
        )));
    }

    let mut ready = 0;
    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| ServeError::Load(format!("cannot read '{}': {e}", dir.display())))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ServeError::Load(format!("cannot read '{}': {e}", dir.display())))?
        {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.file_name().is_some_and(|f| f == MODEL_SETTINGS_FILENAME)
                && bootstrap_model(&path, catalog, registry).await
            {
                ready += 1;
            }
        }
    }

    info!(root = %root.display(), ready, "model repository loaded");
    Ok(ready)
}

/// Register and load one model from its settings file. Returns whether
/// the model reached Ready.
async fn bootstrap_model(
    settings_path: &Path,
    catalog: &AdapterCatalog,
    registry: &ModelRegistry,
) -> bool {
    let bytes = match tokio::fs::read(settings_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(path = %settings_path.display(), error = %e, "cannot read model settings");
            return false;
        }
    };

    let mut settings = match ModelSettings::from_json(&bytes) {
        Ok(settings) => settings,
        Err(e) => {
            error!(path = %settings_path.display(), error = %e, "invalid model settings");
            return false;
        }
    };

    // Default the artifact location to the settings file's directory.
    if let Some(uri) = settings.resolved_uri(settings_path.parent()) {
        settings.parameters.uri = Some(uri.to_string_lossy().into_owned());
    }

    let factory = match catalog.get(&settings.implementation) {
        Ok(factory) => factory,
        Err(e) => {
            error!(model = %settings.name, error = %e, "unknown model implementation");
            return false;
        }
    };

    let identity = ModelIdentity::new(settings.name.clone(), settings.version.clone());
    if let Err(e) = registry.register(settings, factory).await {
        error!(model = %identity, error = %e, "model registration failed");
        return false;
    }

    match registry.load(&identity).await {
        Ok(()) => true,
        Err(e) => {
            // The registry keeps the entry in LoadFailed for diagnostics.
            warn!(model = %identity, error = %e, "model failed to load");
            false
        }
    }
}
