//! Model registry: the only mutable shared structure in the core.
//!
//! Each registered identity owns a slot holding its lifecycle state and,
//! once loaded, a shared handle to its adapter. Lifecycle transitions for
//! one identity are serialized by a per-slot mutex; resolution clones the
//! adapter handle under a read lock, so a predict call either sees the
//! fully-loaded adapter or no adapter at all — never a half-swapped slot.

use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tensorport_core::{
    AdapterFactory, ModelAdapter, ModelIdentity, ModelMetadata, ModelSettings, ServeError,
    ServeResult,
};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// Lifecycle state of one registered model identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelState {
    /// Registered but never loaded.
    #[default]
    Unloaded,
    /// Load in progress.
    Loading,
    /// Loaded and serving.
    Ready,
    /// Load failed; entry stays queryable for diagnostics but cannot
    /// serve inference. A reload re-enters `Loading`.
    LoadFailed(String),
    /// Unload in progress.
    Unloading,
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelState::Unloaded => f.write_str("Unloaded"),
            ModelState::Loading => f.write_str("Loading"),
            ModelState::Ready => f.write_str("Ready"),
            ModelState::LoadFailed(reason) => write!(f, "LoadFailed: {reason}"),
            ModelState::Unloading => f.write_str("Unloading"),
        }
    }
}

struct SlotInner {
    settings: ModelSettings,
    factory: Arc<dyn AdapterFactory>,
    state: ModelState,
    adapter: Option<Arc<dyn ModelAdapter>>,
    /// Monotonic stamp set at the Loading→Ready transition; used to
    /// resolve "no version given" to the most-recently-loaded version.
    load_stamp: u64,
}

struct ModelSlot {
    /// Serializes load/unload for this identity. Held across the whole
    /// transition, including artifact I/O.
    lifecycle: Mutex<()>,
    /// State + adapter handle. Write sections are short; readers never
    /// block on artifact I/O.
    inner: RwLock<SlotInner>,
}

/// A resolved, Ready model: the identity actually served plus a shared
/// adapter handle safe for concurrent predict calls.
pub struct ResolvedModel {
    pub name: String,
    pub version: Option<String>,
    pub adapter: Arc<dyn ModelAdapter>,
}

/// Registry of loaded model adapters, keyed by (name, optional version).
#[derive(Default)]
pub struct ModelRegistry {
    slots: DashMap<ModelIdentity, Arc<ModelSlot>>,
    load_seq: AtomicU64,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered identities, in any state.
    pub fn model_count(&self) -> usize {
        self.slots.len()
    }

    /// Insert a new entry in `Unloaded` state.
    ///
    /// Fails with [`ServeError::DuplicateModel`] when the identity is
    /// already present and currently Ready; a non-Ready entry is replaced.
    pub async fn register(
        &self,
        settings: ModelSettings,
        factory: Arc<dyn AdapterFactory>,
    ) -> ServeResult<()> {
        let identity = ModelIdentity::new(settings.name.clone(), settings.version.clone());

        let existing = self.slots.get(&identity).map(|e| e.value().clone());
        if let Some(slot) = existing {
            let inner = slot.inner.read().await;
            if inner.state == ModelState::Ready {
                return Err(ServeError::DuplicateModel(identity.to_string()));
            }
        }

        info!(model = %identity, implementation = %factory.kind(), "model registered");
        self.slots.insert(
            identity,
            Arc::new(ModelSlot {
                lifecycle: Mutex::new(()),
                inner: RwLock::new(SlotInner {
                    settings,
                    factory,
                    state: ModelState::Unloaded,
                    adapter: None,
                    load_stamp: 0,
                }),
            }),
        );
        Ok(())
    }

    /// Transition `Unloaded`/`LoadFailed` → `Loading` → `Ready` or
    /// `LoadFailed`, constructing the adapter and running its `load`.
    pub async fn load(&self, identity: &ModelIdentity) -> ServeResult<()> {
        let slot = self.slot(identity)?;
        let _transition = slot.lifecycle.lock().await;

        let (settings, factory) = {
            let mut inner = slot.inner.write().await;
            inner.state = ModelState::Loading;
            inner.adapter = None;
            (inner.settings.clone(), inner.factory.clone())
        };

        let loaded = async {
            let mut adapter = factory.create(settings)?;
            adapter.load().await?;
            Ok::<_, ServeError>(adapter)
        }
        .await;

        match loaded {
            Ok(adapter) => {
                let stamp = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
                let mut inner = slot.inner.write().await;
                inner.adapter = Some(Arc::from(adapter));
                inner.state = ModelState::Ready;
                inner.load_stamp = stamp;
                info!(model = %identity, "model loaded");
                Ok(())
            }
            Err(e) => {
                let mut inner = slot.inner.write().await;
                inner.state = ModelState::LoadFailed(e.to_string());
                warn!(model = %identity, error = %e, "model load failed");
                Err(e)
            }
        }
    }

    /// Transition `Unloading` → `Unloaded` and remove the identity from
    /// resolution entirely.
    pub async fn unload(&self, identity: &ModelIdentity) -> ServeResult<()> {
        let slot = self.slot(identity)?;
        let _transition = slot.lifecycle.lock().await;

        {
            let mut inner = slot.inner.write().await;
            inner.state = ModelState::Unloading;
            // In-flight predicts keep their own Arc; the model object is
            // dropped when the last of them finishes.
            inner.adapter = None;
            inner.state = ModelState::Unloaded;
        }

        self.slots.remove(identity);
        info!(model = %identity, "model unloaded");
        Ok(())
    }

    /// Resolve a name (and optional version) to a Ready adapter handle.
    ///
    /// With no version given, the most-recently-loaded Ready version of
    /// that name wins. Anything short of Ready is a not-found: callers
    /// must not be able to reach a mid-load adapter.
    pub async fn resolve(&self, name: &str, version: Option<&str>) -> ServeResult<ResolvedModel> {
        if let Some(version) = version {
            let identity = ModelIdentity::new(name, Some(version));
            let slot = self.slot(&identity)?;
            let inner = slot.inner.read().await;
            return match (&inner.state, &inner.adapter) {
                (ModelState::Ready, Some(adapter)) => Ok(ResolvedModel {
                    name: name.to_string(),
                    version: Some(version.to_string()),
                    adapter: adapter.clone(),
                }),
                _ => Err(ServeError::ModelNotFound(identity.to_string())),
            };
        }

        let mut best: Option<ResolvedModel> = None;
        let mut best_stamp = 0;
        for (identity, slot) in self.slots_for(name) {
            let inner = slot.inner.read().await;
            if let (ModelState::Ready, Some(adapter)) = (&inner.state, &inner.adapter) {
                if inner.load_stamp > best_stamp {
                    best_stamp = inner.load_stamp;
                    best = Some(ResolvedModel {
                        name: name.to_string(),
                        version: identity.version.clone(),
                        adapter: adapter.clone(),
                    });
                }
            }
        }
        best.ok_or_else(|| ServeError::ModelNotFound(name.to_string()))
    }

    /// Current lifecycle state for an identity, or `None` when the name
    /// (or exact version) was never registered.
    ///
    /// With no version given, a name with at least one Ready version
    /// reports Ready; otherwise the state of its most-recently-stamped
    /// entry is reported.
    pub async fn state_of(&self, name: &str, version: Option<&str>) -> Option<ModelState> {
        if let Some(version) = version {
            let identity = ModelIdentity::new(name, Some(version));
            let slot = self.slots.get(&identity).map(|e| e.value().clone())?;
            let inner = slot.inner.read().await;
            return Some(inner.state.clone());
        }

        let mut fallback: Option<(u64, ModelState)> = None;
        for (_, slot) in self.slots_for(name) {
            let inner = slot.inner.read().await;
            if inner.state == ModelState::Ready {
                return Some(ModelState::Ready);
            }
            let newer = fallback
                .as_ref()
                .is_none_or(|(stamp, _)| inner.load_stamp > *stamp);
            if newer {
                fallback = Some((inner.load_stamp, inner.state.clone()));
            }
        }
        fallback.map(|(_, state)| state)
    }

    /// Server-wide readiness: true iff every registered model is Ready.
    /// An empty registry is a valid, healthy startup state.
    pub async fn all_ready(&self) -> bool {
        let slots: Vec<_> = self.slots.iter().map(|e| e.value().clone()).collect();
        for slot in slots {
            let inner = slot.inner.read().await;
            if inner.state != ModelState::Ready {
                return false;
            }
        }
        true
    }

    /// Metadata for an identity, in any lifecycle state.
    ///
    /// A loaded adapter supplies its declared signatures; an unloaded or
    /// failed entry is described from its settings alone.
    pub async fn model_metadata(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> ServeResult<ModelMetadata> {
        let slot = match version {
            Some(version) => self.slot(&ModelIdentity::new(name, Some(version)))?,
            None => {
                // Prefer the entry resolution would pick; fall back to any
                // registered entry of that name.
                let mut best: Option<(u64, bool, Arc<ModelSlot>)> = None;
                for (_, slot) in self.slots_for(name) {
                    let inner = slot.inner.read().await;
                    let ready = inner.state == ModelState::Ready;
                    let stamp = inner.load_stamp;
                    drop(inner);
                    let better = best
                        .as_ref()
                        .is_none_or(|(s, r, _)| (ready, stamp) > (*r, *s));
                    if better {
                        best = Some((stamp, ready, slot));
                    }
                }
                best.map(|(_, _, slot)| slot)
                    .ok_or_else(|| ServeError::ModelNotFound(name.to_string()))?
            }
        };

        let inner = slot.inner.read().await;
        let mut metadata = match &inner.adapter {
            Some(adapter) => adapter.metadata(),
            None => ModelMetadata {
                name: inner.settings.name.clone(),
                platform: inner.settings.implementation.clone(),
                versions: Vec::new(),
                inputs: Vec::new(),
                outputs: Vec::new(),
            },
        };
        drop(inner);

        metadata.versions = self.versions_of(name);
        Ok(metadata)
    }

    /// All registered version strings for a name, in no particular order.
    pub fn versions_of(&self, name: &str) -> Vec<String> {
        self.slots
            .iter()
            .filter(|e| e.key().name == name)
            .filter_map(|e| e.key().version.clone())
            .collect()
    }

    fn slot(&self, identity: &ModelIdentity) -> ServeResult<Arc<ModelSlot>> {
        self.slots
            .get(identity)
            .map(|e| e.value().clone())
            .ok_or_else(|| ServeError::ModelNotFound(identity.to_string()))
    }

    fn slots_for(&self, name: &str) -> Vec<(ModelIdentity, Arc<ModelSlot>)> {
        self.slots
            .iter()
            .filter(|e| e.key().name == name)
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }
}
