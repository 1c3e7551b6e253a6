//! HTTP transport binder for the Tensorport inference server.
//!
//! Exposes the data plane's six operations over the V2 inference
//! protocol. The library surface exists so integration tests (and
//! embedders) can build the router without binding a socket.

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{InferenceServer, build_router};
pub use state::AppState;
