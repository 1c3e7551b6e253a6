//! Tensorport inference server — entry point.
//!
//! Reads configuration from environment variables, bootstraps the model
//! repository, and serves the V2 inference protocol.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TENSORPORT_HOST` | `0.0.0.0` | Listen address. |
//! | `TENSORPORT_PORT` | `8080` | TCP port to listen on. |
//! | `TENSORPORT_MODEL_REPOSITORY` | *(none)* | Root scanned for `model-settings.json` files. |
//! | `TENSORPORT_DEFAULT_DEADLINE_MS` | `60000` | Default predict deadline. |
//! | `TENSORPORT_DEBUG` | `false` | Verbose logging. |

use std::sync::Arc;
use tensorport_adapters::{DummyClassifierFactory, IdentityAdapterFactory};
use tensorport_core::ServerSettings;
use tensorport_runtime::{AdapterCatalog, DataPlane, ModelRegistry, load_repository};
use tensorport_server::InferenceServer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ServerSettings::from_env();

    let default_level = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("tensorport={default_level}"))),
        )
        .init();

    let registry = Arc::new(ModelRegistry::new());

    // Built-in adapters; external runtimes register their own factories.
    let catalog = AdapterCatalog::new()
        .with_factory(Arc::new(DummyClassifierFactory))
        .with_factory(Arc::new(IdentityAdapterFactory));

    if let Some(root) = &settings.model_repository_root {
        let ready = load_repository(root, &catalog, &registry).await?;
        info!(
            root = %root.display(),
            ready,
            registered = registry.model_count(),
            "model repository bootstrap complete"
        );
    } else {
        warn!("TENSORPORT_MODEL_REPOSITORY is not set — starting with an empty registry");
    }

    let host = settings.host.clone();
    let port = settings.port;
    let data_plane = Arc::new(DataPlane::new(settings, registry));

    InferenceServer::new(data_plane, host, port).start().await?;
    Ok(())
}
