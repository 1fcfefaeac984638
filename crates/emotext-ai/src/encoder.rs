//! Text-to-sequence transform: tokenizer plus fixed-length padding.

use tokenizers::Tokenizer;

use crate::error::ClassifierError;
use crate::params::ModelParams;

/// Turns raw text into the fixed-length id sequence the model expects.
///
/// The tokenizer file carries the vocabulary and its own normalization,
/// splitting, and unknown-token rules; [`ModelParams`] pins the sequence
/// geometry. Every input, including the empty string, encodes to exactly
/// `max_length` ids.
pub struct TextEncoder {
    tokenizer: Tokenizer,
    max_length: usize,
}

impl TextEncoder {
    /// Configure `tokenizer` with the fixed-length padding and truncation
    /// from `params`.
    pub fn new(mut tokenizer: Tokenizer, params: &ModelParams) -> Result<Self, ClassifierError> {
        tokenizer
            .with_truncation(Some(params.truncation_params()))
            .map_err(ClassifierError::ConfigureTruncation)?;
        tokenizer.with_padding(Some(params.padding_params()));

        Ok(Self {
            tokenizer,
            max_length: params.max_length,
        })
    }

    /// Sequence length every encoding is padded or truncated to.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Encode one text into exactly `max_length` ids.
    pub fn encode(&self, text: &str) -> Result<Vec<i64>, ClassifierError> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(ClassifierError::Encode)?;

        let ids = encoding.get_ids();
        if ids.len() != self.max_length {
            return Err(ClassifierError::SequenceLength {
                expected: self.max_length,
                actual: ids.len(),
            });
        }

        Ok(ids.iter().map(|&id| i64::from(id)).collect())
    }
}
