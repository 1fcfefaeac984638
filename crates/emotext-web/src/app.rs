//! Router and handlers for the single-page classifier UI.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use serde::Deserialize;

use emotext_ai::{EmotionClassifier, OnnxSequenceModel, SequenceModel};

use crate::page;

/// Shared request state: the classifier loaded once at startup.
pub struct AppState<M = OnnxSequenceModel> {
    classifier: EmotionClassifier<M>,
}

impl<M> AppState<M> {
    pub fn new(classifier: EmotionClassifier<M>) -> Self {
        Self { classifier }
    }
}

/// Form body for `POST /predict`.
#[derive(Debug, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    text: String,
}

/// Build the two-route application: the form page and the predict action.
pub fn router<M>(state: Arc<AppState<M>>) -> Router
where
    M: SequenceModel + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict::<M>))
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(page::render(None, ""))
}

async fn predict<M>(
    State(state): State<Arc<AppState<M>>>,
    Form(form): Form<PredictForm>,
) -> Result<Html<String>, StatusCode>
where
    M: SequenceModel + Send + Sync + 'static,
{
    // Empty and whitespace-only submissions never reach the model.
    if form.text.trim().is_empty() {
        return Ok(Html(page::render(Some(page::EMPTY_PROMPT), &form.text)));
    }

    match state.classifier.predict(&form.text) {
        Ok(prediction) => {
            tracing::info!(
                label = %prediction.label,
                score = prediction.score,
                "prediction served"
            );
            let line = page::prediction_line(&prediction.label);
            Ok(Html(page::render(Some(&line), &form.text)))
        }
        Err(e) => {
            tracing::error!("prediction failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emotext_ai::{ClassifierError, LabelSet, ModelParams, PadSide};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokenizers::Tokenizer;
    use tokenizers::models::wordlevel::WordLevel;
    use tokenizers::normalizers::Lowercase;
    use tokenizers::pre_tokenizers::whitespace::Whitespace;

    /// Scripted model: fixed scores, call counter.
    struct ScriptedModel {
        scores: Vec<f32>,
        calls: Arc<AtomicUsize>,
    }

    impl SequenceModel for ScriptedModel {
        fn forward(&self, _ids: &[i64]) -> Result<Vec<f32>, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.scores.clone())
        }
    }

    /// Model that always fails, for the error path.
    struct FailingModel;

    impl SequenceModel for FailingModel {
        fn forward(&self, _ids: &[i64]) -> Result<Vec<f32>, ClassifierError> {
            Err(ClassifierError::SessionPoisoned)
        }
    }

    fn word_tokenizer() -> Tokenizer {
        let mut vocab: HashMap<String, u32> = HashMap::new();
        vocab.insert("<unk>".to_string(), 0);
        vocab.insert("i".to_string(), 1);
        vocab.insert("am".to_string(), 2);
        vocab.insert("happy".to_string(), 3);

        let model = WordLevel::builder()
            .vocab(vocab)
            .unk_token("<unk>".to_string())
            .build()
            .unwrap();

        let mut tokenizer = Tokenizer::new(model);
        tokenizer.with_normalizer(Some(Lowercase));
        tokenizer.with_pre_tokenizer(Some(Whitespace));
        tokenizer
    }

    fn params() -> ModelParams {
        ModelParams {
            max_length: 20,
            padding: PadSide::Pre,
            truncation: PadSide::Pre,
            pad_id: 0,
        }
    }

    fn labels() -> LabelSet {
        LabelSet::new(vec![
            "angry".to_string(),
            "sad".to_string(),
            "happy".to_string(),
            "fear".to_string(),
        ])
        .unwrap()
    }

    fn scripted_state(scores: Vec<f32>) -> (Arc<AppState<ScriptedModel>>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = ScriptedModel {
            scores,
            calls: calls.clone(),
        };
        let classifier =
            EmotionClassifier::from_parts(word_tokenizer(), params(), labels(), model).unwrap();
        (Arc::new(AppState::new(classifier)), calls)
    }

    #[tokio::test]
    async fn index_serves_the_form() {
        let html = index().await.0;
        assert!(html.contains("Text Emotion Classification"));
        assert!(html.contains("Predict Emotion"));
    }

    #[tokio::test]
    async fn predict_renders_the_label() {
        let (state, calls) = scripted_state(vec![0.05, 0.1, 0.8, 0.05]);
        let form = Form(PredictForm {
            text: "i am happy".to_string(),
        });

        let html = predict(State(state), form).await.unwrap().0;
        assert!(html.contains("The predicted emotion is: <strong>happy</strong>"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_input_prompts_without_invoking_the_model() {
        let (state, calls) = scripted_state(vec![0.25, 0.25, 0.25, 0.25]);
        let form = Form(PredictForm {
            text: String::new(),
        });

        let html = predict(State(state), form).await.unwrap().0;
        assert!(html.contains(page::EMPTY_PROMPT));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn whitespace_input_counts_as_empty() {
        let (state, calls) = scripted_state(vec![0.25, 0.25, 0.25, 0.25]);
        let form = Form(PredictForm {
            text: "  \t \n ".to_string(),
        });

        let html = predict(State(state), form).await.unwrap().0;
        assert!(html.contains(page::EMPTY_PROMPT));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submitted_markup_is_escaped() {
        let (state, _) = scripted_state(vec![0.05, 0.1, 0.8, 0.05]);
        let form = Form(PredictForm {
            text: "<script>alert(1)</script> happy".to_string(),
        });

        let html = predict(State(state), form).await.unwrap().0;
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[tokio::test]
    async fn model_failure_maps_to_internal_error() {
        let classifier =
            EmotionClassifier::from_parts(word_tokenizer(), params(), labels(), FailingModel)
                .unwrap();
        let state = Arc::new(AppState::new(classifier));
        let form = Form(PredictForm {
            text: "i am happy".to_string(),
        });

        let status = predict(State(state), form).await.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
