//! Inference layer for the emotion classifier: ONNX Runtime model, word-level
//! tokenizer, and label decoding behind one classifier type.
//!
//! Everything is loaded once from a model directory containing `model.onnx`,
//! `tokenizer.json`, `labels.json`, and `params.json`, then shared read-only.

mod classifier;
mod encoder;
mod error;
mod labels;
mod params;

pub use classifier::{
    EmotionClassifier, LABELS_FILE, MODEL_FILE, OnnxSequenceModel, PARAMS_FILE, Prediction,
    SequenceModel, TOKENIZER_FILE,
};
pub use encoder::TextEncoder;
pub use error::ClassifierError;
pub use labels::LabelSet;
pub use params::{ModelParams, PadSide};
