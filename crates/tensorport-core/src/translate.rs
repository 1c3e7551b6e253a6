//! Request validation and the default-output policy.
//!
//! The data plane calls [`validate_request`] before any adapter sees the
//! request. Adapters call [`select_outputs`] from inside `predict`,
//! parameterised with their own default and known output sets, so the
//! policy logic lives in one place; building outputs in the selection
//! order it returns preserves the requested output order.

use crate::error::{ServeError, ServeResult};
use crate::types::InferenceRequest;

/// Validate that every input tensor's payload length matches the product
/// of its shape dimensions, and that at least one input is present.
pub fn validate_request(request: &InferenceRequest) -> ServeResult<()> {
    if request.inputs.is_empty() {
        return Err(ServeError::InvalidInput(
            "at least one input tensor is required".to_string(),
        ));
    }

    for input in &request.inputs {
        let expected = input
            .shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or_else(|| {
                ServeError::InvalidInput(format!(
                    "input '{}' shape {:?} overflows the element count",
                    input.name, input.shape
                ))
            })?;
        let actual = input.data.len();
        if actual != expected {
            return Err(ServeError::InvalidInput(format!(
                "input '{}' has {} elements but shape {:?} implies {}",
                input.name, actual, input.shape, expected
            )));
        }
    }

    Ok(())
}

/// Resolve the effective output selection for a request.
///
/// An empty selection yields `defaults` (the adapter's fixed default
/// output set). A non-empty selection is passed through unchanged, in
/// request order, after checking every name against `known`; an unknown
/// name is an inference error.
pub fn select_outputs(
    request: &InferenceRequest,
    defaults: &[&str],
    known: &[&str],
) -> ServeResult<Vec<String>> {
    let requested = request.requested_output_names();
    if requested.is_empty() {
        return Ok(defaults.iter().map(|s| s.to_string()).collect());
    }

    for name in &requested {
        if !known.contains(name) {
            return Err(ServeError::Inference(format!(
                "output '{}' is not produced by this model (known outputs: {})",
                name,
                known.join(", ")
            )));
        }
    }

    Ok(requested.into_iter().map(String::from).collect())
}
