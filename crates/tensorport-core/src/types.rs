//! V2 inference protocol wire types.
//!
//! These structs are the only shapes the core depends on; how bytes are
//! decoded into them (JSON codec choice, HTTP framing) is the transport
//! binder's concern.

use crate::datatype::Datatype;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Resolution key for a loaded model: name plus optional version.
///
/// Absence of a version means "the current/default version".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelIdentity {
    pub name: String,
    pub version: Option<String>,
}

impl ModelIdentity {
    pub fn new(name: impl Into<String>, version: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            version: version.map(Into::into),
        }
    }
}

impl fmt::Display for ModelIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{}", self.name, v),
            None => f.write_str(&self.name),
        }
    }
}

/// Flat tensor payload.
///
/// Untagged so that `[1, 2, 3]` parses as integers, `[1.5, 2.0]` as
/// floats, and so on. Variant order matters: booleans and integers must
/// be tried before floats, since serde_json happily widens integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TensorData {
    Bool(Vec<bool>),
    Int(Vec<i64>),
    Float(Vec<f64>),
    Str(Vec<String>),
}

impl TensorData {
    /// Number of elements in the flat payload.
    pub fn len(&self) -> usize {
        match self {
            TensorData::Bool(v) => v.len(),
            TensorData::Int(v) => v.len(),
            TensorData::Float(v) => v.len(),
            TensorData::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named input tensor in an [`InferenceRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestInput {
    pub name: String,
    pub shape: Vec<usize>,
    pub datatype: Datatype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    pub data: TensorData,
}

/// An explicitly requested output in an [`InferenceRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestOutput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

impl RequestOutput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: None,
        }
    }
}

/// Wire-level inference request: ordered named input tensors plus an
/// optional ordered selection of requested outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    pub inputs: Vec<RequestInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<RequestOutput>>,
}

impl InferenceRequest {
    /// Requested output names in request order; empty when the caller
    /// left the selection to the adapter's default-output policy.
    pub fn requested_output_names(&self) -> Vec<&str> {
        self.outputs
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|o| o.name.as_str())
            .collect()
    }

    /// Per-request deadline override, when the caller supplied
    /// `parameters.timeout_ms`.
    pub fn timeout_ms(&self) -> Option<u64> {
        self.parameters
            .as_ref()
            .and_then(|p| p.get("timeout_ms"))
            .and_then(Value::as_u64)
    }
}

/// A named output tensor in an [`InferenceResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseOutput {
    pub name: String,
    pub shape: Vec<usize>,
    pub datatype: Datatype,
    pub data: TensorData,
}

/// Wire-level inference response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub outputs: Vec<ResponseOutput>,
}

/// Declared input/output signature in [`ModelMetadata`].
///
/// Shape dimensions may be `-1` when the underlying model does not
/// expose a fixed size for that axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorSignature {
    pub name: String,
    pub datatype: Datatype,
    pub shape: Vec<i64>,
}

/// Metadata describing one loaded (or registered) model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    pub platform: String,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub inputs: Vec<TensorSignature>,
    #[serde(default)]
    pub outputs: Vec<TensorSignature>,
}

/// Metadata describing the server itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerMetadata {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}
