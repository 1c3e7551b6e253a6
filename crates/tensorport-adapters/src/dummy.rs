//! Majority-class dummy classifier.
//!
//! Loads a JSON artifact describing class labels and their prior
//! probabilities, then predicts the majority class for every input row.
//! Useful as a baseline model and as the reference adapter for the
//! default-output contract: `predict` is the default output, and
//! `predict_proba` is auxiliary — returned only when asked for.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tensorport_core::{
    AdapterFactory, Datatype, InferenceRequest, InferenceResponse, ModelAdapter, ModelMetadata,
    ModelSettings, ResponseOutput, ServeError, ServeResult, TensorData, TensorSignature, translate,
};
use tracing::info;

/// Primary prediction output; returned when the request selects nothing.
pub const PREDICT_OUTPUT: &str = "predict";
/// Auxiliary per-class probability output; never returned by default.
pub const PREDICT_PROBA_OUTPUT: &str = "predict_proba";

/// Artifact filenames probed when the model URI points at a directory.
pub const WELLKNOWN_MODEL_FILENAMES: &[&str] = &["model.json"];

#[derive(Debug, Clone, Deserialize)]
struct DummyArtifact {
    classes: Vec<i64>,
    priors: Vec<f64>,
}

#[derive(Debug, Clone)]
struct LoadedModel {
    classes: Vec<i64>,
    priors: Vec<f64>,
    majority: i64,
}

pub struct DummyClassifier {
    settings: ModelSettings,
    model: Option<LoadedModel>,
}

impl DummyClassifier {
    pub fn new(settings: ModelSettings) -> Self {
        Self {
            settings,
            model: None,
        }
    }

    fn artifact_path(&self) -> ServeResult<PathBuf> {
        let uri = self.settings.parameters.uri.as_deref().ok_or_else(|| {
            ServeError::Load(format!("model '{}' has no artifact uri", self.settings.name))
        })?;
        let path = Path::new(uri);
        if path.is_dir() {
            for candidate in WELLKNOWN_MODEL_FILENAMES {
                let candidate = path.join(candidate);
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
            return Err(ServeError::Load(format!(
                "no artifact found under '{uri}' (looked for {})",
                WELLKNOWN_MODEL_FILENAMES.join(", ")
            )));
        }
        Ok(path.to_path_buf())
    }

    fn loaded(&self) -> ServeResult<&LoadedModel> {
        self.model
            .as_ref()
            .ok_or_else(|| ServeError::Inference("model is not loaded".to_string()))
    }
}

#[async_trait]
impl ModelAdapter for DummyClassifier {
    async fn load(&mut self) -> ServeResult<()> {
        let path = self.artifact_path()?;
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            ServeError::Load(format!("cannot read artifact '{}': {e}", path.display()))
        })?;
        let artifact: DummyArtifact = serde_json::from_slice(&bytes).map_err(|e| {
            ServeError::Load(format!("invalid artifact '{}': {e}", path.display()))
        })?;

        if artifact.classes.is_empty() {
            return Err(ServeError::Load("artifact declares no classes".to_string()));
        }
        if artifact.classes.len() != artifact.priors.len() {
            return Err(ServeError::Load(format!(
                "artifact declares {} classes but {} priors",
                artifact.classes.len(),
                artifact.priors.len()
            )));
        }

        let majority_idx = artifact
            .priors
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap_or(0);

        info!(
            model = %self.settings.name,
            classes = artifact.classes.len(),
            "dummy classifier loaded"
        );
        self.model = Some(LoadedModel {
            majority: artifact.classes[majority_idx],
            classes: artifact.classes,
            priors: artifact.priors,
        });
        Ok(())
    }

    async fn predict(&self, request: &InferenceRequest) -> ServeResult<InferenceResponse> {
        let model = self.loaded()?;

        if request.inputs.len() != 1 {
            return Err(ServeError::Inference(format!(
                "expected exactly one input tensor, got {}",
                request.inputs.len()
            )));
        }
        let input = &request.inputs[0];
        // One prediction per row of the leading dimension; a 1-D input is
        // one feature per row. Every row must carry at least one element,
        // so a degenerate shape like [N, 0] cannot declare N predictions
        // out of an empty payload.
        let rows = input
            .shape
            .first()
            .copied()
            .unwrap_or_else(|| input.data.len());
        if rows > input.data.len() {
            return Err(ServeError::Inference(format!(
                "input '{}' declares {} rows but carries only {} elements",
                input.name,
                rows,
                input.data.len()
            )));
        }

        let selection = translate::select_outputs(
            request,
            &[PREDICT_OUTPUT],
            &[PREDICT_OUTPUT, PREDICT_PROBA_OUTPUT],
        )?;

        let mut outputs = Vec::with_capacity(selection.len());
        for name in &selection {
            match name.as_str() {
                PREDICT_OUTPUT => outputs.push(ResponseOutput {
                    name: name.clone(),
                    shape: vec![rows],
                    datatype: Datatype::Int64,
                    data: TensorData::Int(vec![model.majority; rows]),
                }),
                PREDICT_PROBA_OUTPUT => {
                    let cells = rows.checked_mul(model.priors.len()).ok_or_else(|| {
                        ServeError::Inference(format!(
                            "probability output for {rows} rows overflows the element count"
                        ))
                    })?;
                    let mut data = Vec::with_capacity(cells);
                    for _ in 0..rows {
                        data.extend_from_slice(&model.priors);
                    }
                    outputs.push(ResponseOutput {
                        name: name.clone(),
                        shape: vec![rows, model.priors.len()],
                        datatype: Datatype::Fp64,
                        data: TensorData::Float(data),
                    });
                }
                other => {
                    // select_outputs already filtered against the known
                    // set, so this is unreachable for well-formed calls.
                    return Err(ServeError::Inference(format!(
                        "output '{other}' is not produced by this model"
                    )));
                }
            }
        }

        Ok(InferenceResponse {
            model_name: self.settings.name.clone(),
            model_version: self.settings.version.clone(),
            id: request.id.clone(),
            outputs,
        })
    }

    fn metadata(&self) -> ModelMetadata {
        let n_classes = self
            .model
            .as_ref()
            .map(|m| m.classes.len() as i64)
            .unwrap_or(-1);
        ModelMetadata {
            name: self.settings.name.clone(),
            platform: "tensorport.dummy".to_string(),
            versions: Vec::new(),
            inputs: vec![TensorSignature {
                name: "input-0".to_string(),
                datatype: Datatype::Fp64,
                shape: vec![-1, -1],
            }],
            outputs: vec![
                TensorSignature {
                    name: PREDICT_OUTPUT.to_string(),
                    datatype: Datatype::Int64,
                    shape: vec![-1],
                },
                TensorSignature {
                    name: PREDICT_PROBA_OUTPUT.to_string(),
                    datatype: Datatype::Fp64,
                    shape: vec![-1, n_classes],
                },
            ],
        }
    }
}

/// Factory for [`DummyClassifier`], registered under `tensorport.dummy`.
#[derive(Default)]
pub struct DummyClassifierFactory;

impl AdapterFactory for DummyClassifierFactory {
    fn kind(&self) -> &str {
        "tensorport.dummy"
    }

    fn create(&self, settings: ModelSettings) -> ServeResult<Box<dyn ModelAdapter>> {
        Ok(Box::new(DummyClassifier::new(settings)))
    }
}
