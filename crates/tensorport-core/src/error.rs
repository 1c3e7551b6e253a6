//! Error taxonomy for the inference data plane.
//!
//! Every failure raised by an adapter, the registry, or the translator is
//! mapped into one of these variants before it reaches the transport
//! boundary. The HTTP status mapping lives in `tensorport-server`; this
//! crate stays transport-agnostic.

use thiserror::Error;

/// Data-plane errors.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The requested model identity is unknown, or known but not Ready.
    #[error("model '{0}' not found")]
    ModelNotFound(String),

    /// The request failed translation or validation (shape/datatype
    /// mismatch, missing inputs). The caller must fix and resubmit.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The adapter raised during prediction, or an unknown output name
    /// was requested.
    #[error("inference failed: {0}")]
    Inference(String),

    /// The adapter failed while loading its artifact. Recorded in the
    /// registry as `LoadFailed`; surfaced via readiness/metadata queries
    /// rather than via inference.
    #[error("model load failed: {0}")]
    Load(String),

    /// A model with the same identity is already registered and Ready.
    #[error("model '{0}' is already registered")]
    DuplicateModel(String),
}

pub type ServeResult<T> = Result<T, ServeError>;
