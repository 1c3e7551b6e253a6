//! Identity (echo) adapter.
//!
//! Returns its single input tensor unchanged as the `echo` output. Needs
//! no artifact, which makes it the reference adapter for fixtures and
//! smoke tests. An optional `predict_delay_ms` parameter makes each
//! predict call sleep, for exercising deadline handling.

use async_trait::async_trait;
use std::time::Duration;
use tensorport_core::{
    AdapterFactory, Datatype, InferenceRequest, InferenceResponse, ModelAdapter, ModelMetadata,
    ModelSettings, ResponseOutput, ServeError, ServeResult, TensorSignature, translate,
};

/// The single output this adapter produces, and its default.
pub const ECHO_OUTPUT: &str = "echo";

pub struct IdentityAdapter {
    settings: ModelSettings,
    predict_delay: Duration,
    loaded: bool,
}

impl IdentityAdapter {
    pub fn new(settings: ModelSettings) -> Self {
        let predict_delay = settings
            .parameters
            .extra
            .get("predict_delay_ms")
            .and_then(serde_json::Value::as_u64)
            .map(Duration::from_millis)
            .unwrap_or_default();
        Self {
            settings,
            predict_delay,
            loaded: false,
        }
    }
}

#[async_trait]
impl ModelAdapter for IdentityAdapter {
    async fn load(&mut self) -> ServeResult<()> {
        self.loaded = true;
        Ok(())
    }

    async fn predict(&self, request: &InferenceRequest) -> ServeResult<InferenceResponse> {
        if !self.loaded {
            return Err(ServeError::Inference("model is not loaded".to_string()));
        }
        if request.inputs.len() != 1 {
            return Err(ServeError::Inference(format!(
                "expected exactly one input tensor, got {}",
                request.inputs.len()
            )));
        }

        let selection = translate::select_outputs(request, &[ECHO_OUTPUT], &[ECHO_OUTPUT])?;

        if !self.predict_delay.is_zero() {
            tokio::time::sleep(self.predict_delay).await;
        }

        let input = &request.inputs[0];
        let outputs = selection
            .into_iter()
            .map(|name| ResponseOutput {
                name,
                shape: input.shape.clone(),
                datatype: input.datatype,
                data: input.data.clone(),
            })
            .collect();

        Ok(InferenceResponse {
            model_name: self.settings.name.clone(),
            model_version: self.settings.version.clone(),
            id: request.id.clone(),
            outputs,
        })
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            name: self.settings.name.clone(),
            platform: "tensorport.identity".to_string(),
            versions: Vec::new(),
            inputs: vec![TensorSignature {
                name: "input-0".to_string(),
                datatype: Datatype::Fp64,
                shape: vec![-1],
            }],
            outputs: vec![TensorSignature {
                name: ECHO_OUTPUT.to_string(),
                datatype: Datatype::Fp64,
                shape: vec![-1],
            }],
        }
    }
}

/// Factory for [`IdentityAdapter`], registered under `tensorport.identity`.
#[derive(Default)]
pub struct IdentityAdapterFactory;

impl AdapterFactory for IdentityAdapterFactory {
    fn kind(&self) -> &str {
        "tensorport.identity"
    }

    fn create(&self, settings: ModelSettings) -> ServeResult<Box<dyn ModelAdapter>> {
        Ok(Box::new(IdentityAdapter::new(settings)))
    }
}
