//! Emotion classifier: artifact loading, ONNX inference, argmax, label decoding.
//!
//! The model directory must contain `model.onnx`, `tokenizer.json`,
//! `labels.json`, and `params.json`. All four load once at startup; a missing
//! or corrupt artifact is fatal.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::TensorRef;
use serde::de::DeserializeOwned;
use tokenizers::Tokenizer;
use tracing::info;

use crate::encoder::TextEncoder;
use crate::error::ClassifierError;
use crate::labels::LabelSet;
use crate::params::ModelParams;

/// Trained model artifact inside the model directory.
pub const MODEL_FILE: &str = "model.onnx";
/// Vocabulary/tokenizer artifact inside the model directory.
pub const TOKENIZER_FILE: &str = "tokenizer.json";
/// Label decoder artifact inside the model directory.
pub const LABELS_FILE: &str = "labels.json";
/// Hyperparameter artifact inside the model directory.
pub const PARAMS_FILE: &str = "params.json";

/// A trained sequence model: fixed-length id sequence in, one score per
/// class out.
pub trait SequenceModel {
    /// Score a single sequence (batch size 1).
    fn forward(&self, ids: &[i64]) -> Result<Vec<f32>, ClassifierError>;
}

/// ONNX Runtime implementation of [`SequenceModel`].
///
/// `Session::run` takes the session mutably, so inference serializes behind
/// a mutex while callers share the model through `&self`.
pub struct OnnxSequenceModel {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl OnnxSequenceModel {
    /// Load an ONNX model file into a session, taking the first declared
    /// input and output as the inference signature.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let session = Session::builder()
            .map_err(ClassifierError::CreateSession)?
            .commit_from_file(path)
            .map_err(ClassifierError::CreateSession)?;

        let input_name = match session.inputs().first() {
            Some(input) => input.name().to_string(),
            None => return Err(ClassifierError::NoModelInputs),
        };
        let output_name = match session.outputs().first() {
            Some(output) => output.name().to_string(),
            None => return Err(ClassifierError::NoModelOutputs),
        };

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }
}

impl SequenceModel for OnnxSequenceModel {
    fn forward(&self, ids: &[i64]) -> Result<Vec<f32>, ClassifierError> {
        let tensor = TensorRef::from_array_view(([1usize, ids.len()], ids))
            .map_err(ClassifierError::EncodeTensor)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifierError::SessionPoisoned)?;

        let input_name = self.input_name.as_str();
        let outputs = session
            .run(ort::inputs! {
                input_name => tensor,
            })
            .map_err(ClassifierError::Inference)?;

        let value = outputs
            .get(&self.output_name)
            .ok_or_else(|| ClassifierError::OutputMissing {
                name: self.output_name.clone(),
            })?;
        let (_, scores) = value
            .try_extract_tensor::<f32>()
            .map_err(ClassifierError::Inference)?;

        Ok(scores.to_vec())
    }
}

/// A classified input: winning label and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

/// Text-in, label-out emotion classifier.
///
/// Generic over the model so tests can script one; the serving path uses
/// [`OnnxSequenceModel`].
pub struct EmotionClassifier<M = OnnxSequenceModel> {
    encoder: TextEncoder,
    labels: LabelSet,
    model: M,
}

impl EmotionClassifier {
    /// Load all four artifacts from a model directory.
    ///
    /// Every artifact is existence-checked up front so a missing file is
    /// reported by name before anything heavier runs.
    pub fn load(model_dir: &Path) -> Result<Self, ClassifierError> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);
        let labels_path = model_dir.join(LABELS_FILE);
        let params_path = model_dir.join(PARAMS_FILE);

        for path in [&model_path, &tokenizer_path, &labels_path, &params_path] {
            if !path.exists() {
                return Err(ClassifierError::ArtifactMissing(path.clone()));
            }
        }

        let params: ModelParams = read_json(&params_path)?;
        let names: Vec<String> = read_json(&labels_path)?;
        let labels = LabelSet::new(names)?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|source| {
            ClassifierError::LoadTokenizer {
                path: tokenizer_path.clone(),
                source,
            }
        })?;

        let model = OnnxSequenceModel::load(&model_path)?;
        let classifier = Self::from_parts(tokenizer, params, labels, model)?;

        info!(
            classes = classifier.labels.len(),
            max_length = classifier.encoder.max_length(),
            model = %model_path.display(),
            "loaded emotion classifier"
        );
        Ok(classifier)
    }
}

impl<M: SequenceModel> EmotionClassifier<M> {
    /// Assemble a classifier from already-loaded pieces.
    pub fn from_parts(
        tokenizer: Tokenizer,
        params: ModelParams,
        labels: LabelSet,
        model: M,
    ) -> Result<Self, ClassifierError> {
        if params.max_length == 0 {
            return Err(ClassifierError::ZeroMaxLength);
        }
        let encoder = TextEncoder::new(tokenizer, &params)?;
        Ok(Self {
            encoder,
            labels,
            model,
        })
    }

    /// Class names in model output order.
    pub fn labels(&self) -> &[String] {
        self.labels.names()
    }

    /// Sequence length inputs are padded or truncated to.
    pub fn max_length(&self) -> usize {
        self.encoder.max_length()
    }

    /// Classify one text: encode, run the model, argmax, decode.
    ///
    /// Empty input still runs the model on an all-padding sequence; callers
    /// that want to prompt instead screen before calling.
    pub fn predict(&self, text: &str) -> Result<Prediction, ClassifierError> {
        let ids = self.encoder.encode(text)?;
        let scores = self.model.forward(&ids)?;

        if scores.len() != self.labels.len() {
            return Err(ClassifierError::ClassCount {
                expected: self.labels.len(),
                actual: scores.len(),
            });
        }

        let (index, score) = argmax(&scores);
        let label = self
            .labels
            .name(index)
            .ok_or(ClassifierError::ClassCount {
                expected: self.labels.len(),
                actual: scores.len(),
            })?
            .to_string();

        Ok(Prediction { label, score })
    }
}

/// Index and value of the highest score. Ties go to the lowest index,
/// matching the label encoder's ordering.
fn argmax(scores: &[f32]) -> (usize, f32) {
    let mut best_index = 0;
    let mut best_score = f32::NEG_INFINITY;

    for (i, &score) in scores.iter().enumerate() {
        if score > best_score {
            best_score = score;
            best_index = i;
        }
    }

    (best_index, best_score)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ClassifierError> {
    let file = File::open(path).map_err(|source| ClassifierError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(file).map_err(|source| ClassifierError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
