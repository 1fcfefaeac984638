use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use emotext_ai::EmotionClassifier;
use tokio::net::TcpListener;

use crate::app::AppState;

mod app;
mod page;

/// Emotion classification web demo.
#[derive(Parser, Debug)]
#[command(name = "emotext", version, about)]
struct Args {
    /// Directory holding model.onnx, tokenizer.json, labels.json, params.json.
    #[arg(long, default_value = "model", env = "EMOTEXT_MODEL_DIR")]
    model_dir: PathBuf,

    /// Address to serve on.
    #[arg(long, default_value = "127.0.0.1:8080", env = "EMOTEXT_LISTEN")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("emotext v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    // All four artifacts load before the listener binds; a bad model
    // directory is a startup failure, not a degraded service.
    let classifier = EmotionClassifier::load(&args.model_dir)
        .with_context(|| format!("load model artifacts from {}", args.model_dir.display()))?;

    let app = app::router(Arc::new(AppState::new(classifier)));

    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("bind {}", args.listen))?;
    tracing::info!(addr = %args.listen, "serving");

    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
