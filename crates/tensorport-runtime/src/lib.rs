//! Runtime layer of the Tensorport inference server: the model registry
//! (lifecycle + resolution), the data-plane orchestrator, and the model
//! repository bootstrap.

pub mod dataplane;
pub mod registry;
pub mod repository;

pub use dataplane::DataPlane;
pub use registry::{ModelRegistry, ModelState, ResolvedModel};
pub use repository::{AdapterCatalog, MODEL_SETTINGS_FILENAME, load_repository};
