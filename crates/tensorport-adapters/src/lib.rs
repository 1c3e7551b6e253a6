//! Built-in model adapters.
//!
//! Each adapter is an independent [`ModelAdapter`](tensorport_core::ModelAdapter)
//! implementation with a matching factory; external runtimes ship their
//! own crates and plug into the same catalog.

pub mod dummy;
pub mod identity;

pub use dummy::{DummyClassifier, DummyClassifierFactory};
pub use identity::{IdentityAdapter, IdentityAdapterFactory};
