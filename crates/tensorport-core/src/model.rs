//! The adapter contract every model runtime implements.

use crate::error::ServeResult;
use crate::settings::ModelSettings;
use crate::types::{InferenceRequest, InferenceResponse, ModelMetadata};
use async_trait::async_trait;

/// Runtime-specific wrapper translating a loaded model object into the
/// `load`/`predict`/`metadata` contract.
///
/// # Contract
///
/// - [`load`](Self::load) reads the artifact and constructs the in-memory
///   model. It is called exactly once by the registry, with exclusive
///   access, before the adapter is ever shared.
/// - [`predict`](Self::predict) must not mutate the loaded model: after
///   `load` completes the adapter is shared behind an `Arc` and predict
///   calls run concurrently. Per-call scratch state must live on the
///   stack of the call itself.
/// - Empty output selection in the request means "return this adapter's
///   default output set" (the primary prediction, not auxiliary outputs).
///   A requested output name the adapter does not produce is an
///   inference error, never a silent drop.
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    /// Read the artifact and construct the in-memory model object.
    async fn load(&mut self) -> ServeResult<()>;

    /// Run inference. Pure with respect to the loaded model state.
    async fn predict(&self, request: &InferenceRequest) -> ServeResult<InferenceResponse>;

    /// Declared input/output signatures. May be approximate when the
    /// underlying model exposes no schema.
    fn metadata(&self) -> ModelMetadata;
}

/// Constructor for one adapter kind, invoked at registration time.
///
/// Construction is the capability check: a factory whose runtime
/// requirements are not satisfied fails here with a load error, rather
/// than deferring the failure to first inference.
pub trait AdapterFactory: Send + Sync {
    /// Implementation tag this factory answers to, e.g. `"tensorport.dummy"`.
    fn kind(&self) -> &str;

    /// Construct an unloaded adapter for the given model settings.
    fn create(&self, settings: ModelSettings) -> ServeResult<Box<dyn ModelAdapter>>;
}
