// src/main.rs

use elearn_backend::config::Config;
use elearn_backend::models::dataset::Dataset;
use elearn_backend::routes;
use elearn_backend::seed;
use elearn_backend::state::AppState;
use elearn_backend::store::InMemoryStore;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let dataset = match load_dataset(&config).await {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!("Failed to load dataset: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Dataset ready: {} learners, {} courses, {} quizzes",
        dataset.learners.len(),
        dataset.courses.len(),
        dataset.quizzes.len()
    );

    let store = match InMemoryStore::from_dataset(dataset) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Rejected dataset: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(url) = &config.scoring_service_url {
        tracing::info!("Delegating quiz scoring to {}", url);
    }

    // Create AppState
    let state = AppState::in_memory(store, config.clone());

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Listening on {}", config.bind_addr);

    // Start the server
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}

async fn load_dataset(config: &Config) -> Result<Dataset, Box<dyn std::error::Error>> {
    match &config.dataset_path {
        Some(path) => {
            tracing::info!("Loading dataset from {}", path);
            let raw = tokio::fs::read_to_string(path).await?;
            Ok(Dataset::from_json(&raw)?)
        }
        None => {
            tracing::info!("No DATASET_PATH set, using demo dataset");
            Ok(seed::demo_dataset())
        }
    }
}
