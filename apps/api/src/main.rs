use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_engine::config::Config;
use resume_engine::llm_client::LlmClient;
use resume_engine::matching::{with_fallback, DictionaryExtractor, KeywordExtractor};
use resume_engine::pipeline::Pipeline;
use resume_engine::routes::build_router;
use resume_engine::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "resume_engine={level},api={level},tower_http={level}",
                level = config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume-engine API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = Arc::new(LlmClient::new(config.llm.clone())?);
    info!(
        "LLM client initialized (provider: {:?}, model: {})",
        llm.provider(),
        llm.model()
    );

    // Keyword extraction is strict unless the dictionary fallback is enabled
    let pipeline = if config.keyword_fallback {
        let keywords = with_fallback(KeywordExtractor::new(llm.clone()), DictionaryExtractor::new()?);
        info!("Keyword extraction: model with dictionary fallback");
        Pipeline::with_keyword_source(llm, Arc::new(keywords))
    } else {
        info!("Keyword extraction: model only");
        Pipeline::new(llm)
    };

    // Build app state
    let state = AppState {
        pipeline: Arc::new(pipeline),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins once a frontend origin is configured

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
