//! Core contracts for the Tensorport inference server.
//!
//! This crate defines everything the rest of the workspace agrees on:
//!
//! - the V2 wire types ([`types`]) and datatype taxonomy ([`datatype`]),
//! - the error taxonomy every failure is mapped into ([`error`]),
//! - the [`ModelAdapter`](model::ModelAdapter) contract each runtime
//!   implements, plus the factory used to construct adapters at
//!   registration time ([`model`]),
//! - request validation and the default-output policy ([`translate`]),
//! - explicit configuration structs ([`settings`]) — there is no ambient
//!   process-wide settings global.

pub mod datatype;
pub mod error;
pub mod model;
pub mod settings;
pub mod translate;
pub mod types;

pub use datatype::Datatype;
pub use error::{ServeError, ServeResult};
pub use model::{AdapterFactory, ModelAdapter};
pub use settings::{ModelParameters, ModelSettings, ServerSettings};
pub use types::{
    InferenceRequest, InferenceResponse, ModelIdentity, ModelMetadata, RequestInput,
    RequestOutput, ResponseOutput, ServerMetadata, TensorData, TensorSignature,
};
