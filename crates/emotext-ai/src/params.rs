//! Model hyperparameters loaded from `params.json`.
//!
//! The record travels with the trained model and pins the sequence geometry:
//! how long every input must be and which side padding and truncation apply
//! to. Defaults match the front-padded convention the model was trained with.

use serde::Deserialize;
use tokenizers::{
    PaddingDirection, PaddingParams, PaddingStrategy, TruncationDirection, TruncationParams,
};

/// Side of the sequence that padding or truncation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadSide {
    /// Front of the sequence.
    Pre,
    /// End of the sequence.
    Post,
}

impl Default for PadSide {
    fn default() -> Self {
        Self::Pre
    }
}

impl PadSide {
    fn padding_direction(self) -> PaddingDirection {
        match self {
            Self::Pre => PaddingDirection::Left,
            Self::Post => PaddingDirection::Right,
        }
    }

    fn truncation_direction(self) -> TruncationDirection {
        match self {
            Self::Pre => TruncationDirection::Left,
            Self::Post => TruncationDirection::Right,
        }
    }
}

/// Hyperparameters the model was trained with.
///
/// `max_length` is required. Padding side, truncation side, and pad id are
/// optional and default to `pre`/`pre`/`0` when the record omits them.
/// Unknown fields (training metadata) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelParams {
    pub max_length: usize,
    #[serde(default)]
    pub padding: PadSide,
    #[serde(default)]
    pub truncation: PadSide,
    #[serde(default)]
    pub pad_id: u32,
}

impl ModelParams {
    /// Fixed-length padding configuration for the tokenizer.
    pub(crate) fn padding_params(&self) -> PaddingParams {
        PaddingParams {
            strategy: PaddingStrategy::Fixed(self.max_length),
            direction: self.padding.padding_direction(),
            pad_id: self.pad_id,
            ..Default::default()
        }
    }

    /// Truncation configuration for the tokenizer.
    pub(crate) fn truncation_params(&self) -> TruncationParams {
        TruncationParams {
            max_length: self.max_length,
            direction: self.truncation.truncation_direction(),
            ..Default::default()
        }
    }
}
