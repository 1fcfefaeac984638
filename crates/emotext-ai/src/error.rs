//! Error types for artifact loading and inference.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading classifier artifacts or running inference.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("artifact not found: {0}")]
    ArtifactMissing(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load tokenizer from {path}: {source}")]
    LoadTokenizer {
        path: PathBuf,
        #[source]
        source: tokenizers::Error,
    },

    #[error("failed to configure tokenizer truncation: {0}")]
    ConfigureTruncation(#[source] tokenizers::Error),

    #[error("failed to create ONNX session: {0}")]
    CreateSession(#[source] ort::Error),

    #[error("model declares no inputs")]
    NoModelInputs,

    #[error("model declares no outputs")]
    NoModelOutputs,

    #[error("params.json requires max_length > 0")]
    ZeroMaxLength,

    #[error("label set is empty")]
    EmptyLabelSet,

    #[error("failed to encode text: {0}")]
    Encode(#[source] tokenizers::Error),

    #[error("tokenizer produced sequence of length {actual} but expected {expected}")]
    SequenceLength { expected: usize, actual: usize },

    #[error("failed to build input tensor: {0}")]
    EncodeTensor(#[source] ort::Error),

    #[error("session mutex was poisoned by a previous panic")]
    SessionPoisoned,

    #[error("failed to run inference: {0}")]
    Inference(#[source] ort::Error),

    #[error("model output \"{name}\" missing from session results")]
    OutputMissing { name: String },

    #[error("model returned {actual} class scores but the label set has {expected}")]
    ClassCount { expected: usize, actual: usize },
}
