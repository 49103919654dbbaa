//! QuestWeaver Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use questweaver_engine::api;
use questweaver_engine::app::{App, RateLimitSettings};
use questweaver_engine::infrastructure::{
    clock::SystemClock,
    gemini::GeminiClient,
    ports::{ClockPort, LlmPort},
    resilient_llm::{ResilientLlmClient, RetryConfig},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "questweaver_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting QuestWeaver Engine");

    // Load configuration
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);
    let rate_limit = RateLimitSettings {
        max: env_u32("RATE_LIMIT_MAX", 30),
        window: chrono::Duration::milliseconds(env_u32("RATE_LIMIT_WINDOW_MS", 60_000) as i64),
    };

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    // The completion client is optional: without GEMINI_API_KEY the server
    // still boots and serves templates, and generation requests answer 500.
    let llm: Option<Arc<dyn LlmPort>> = match GeminiClient::from_env() {
        Some(client) => {
            let retry_config = RetryConfig::default();
            tracing::info!(
                max_retries = retry_config.max_retries,
                base_delay_ms = retry_config.base_delay_ms,
                "LLM client configured with retry"
            );
            Some(Arc::new(ResilientLlmClient::new(
                Arc::new(client),
                retry_config,
            )))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; generation requests will fail as misconfigured");
            None
        }
    };

    let app = Arc::new(App::new(llm, clock, rate_limit));

    // Build router
    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        // JSON content types trigger CORS preflights.
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
