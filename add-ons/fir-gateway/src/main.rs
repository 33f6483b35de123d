//! Axum-based API Gateway for the FIR assistant. Config-driven via CoreConfig.

mod handlers;

use axum::{
    extract::{Json, Path, State},
    http::{Method, StatusCode},
    routing::{get, post},
    Router,
};
use fir_core::{sections, ChatAssistant, CoreConfig, HistoryStore, KnowledgeBase};
use handlers::chat::{chat_history, chat_query, chat_test, clear_history};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Pre-flight check: config loads, FAQ knowledge base parses, history store opens, port is free.
fn run_verify() -> Result<(), String> {
    let config = CoreConfig::load().map_err(|e| format!("Config load failed: {}", e))?;

    print!("Checking FAQ knowledge base {}... ", config.faq_path);
    let kb = KnowledgeBase::load_path(&config.faq_path).map_err(|e| e.to_string())?;
    println!("OK ({} entries)", kb.len());

    print!("Checking chat history store... ");
    let history = HistoryStore::open_path(config.history_path())
        .map_err(|e| format!("fir_history LOCKED or inaccessible: {}", e))?;
    drop(history);
    println!("OK");

    let port = config.port;
    print!("Checking port {}... ", port);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    match std::net::TcpListener::bind(addr) {
        Ok(listener) => {
            drop(listener);
            println!("OK (available)");
        }
        Err(e) => {
            return Err(format!("Port {} BLOCKED: {}", port, e));
        }
    }

    println!("\n✅ SUCCESS: All systems GO. Ready to start gateway.");
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[fir-gateway] .env not loaded: {} (using system environment)", e);
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--verify") {
        match run_verify() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("❌ PRE-FLIGHT FAILED: {}", e);
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(target: "fir::gateway", error = %e, "Gateway failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoxError> {
    let config = Arc::new(CoreConfig::load()?);

    // Loaded once; handlers share it read-only.
    let faq = Arc::new(KnowledgeBase::load_path(&config.faq_path)?);
    let history = Arc::new(HistoryStore::open_path(config.history_path())?);
    tracing::info!(
        target: "fir::gateway",
        faq_entries = faq.len(),
        ipc_sections = sections::SECTIONS.len(),
        "Knowledge loaded"
    );

    let app = build_app(AppState {
        config: Arc::clone(&config),
        assistant: Arc::new(ChatAssistant::new(Arc::clone(&faq))),
        faq,
        history,
    });

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("{} listening on {}", config.app_name, addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/status", get(status))
        .route("/api/v1/faq", post(faq_lookup))
        .route("/api/v1/sections", get(list_sections))
        .route("/api/v1/sections/:code", get(get_section))
        .route("/chatbot/api/query", post(chat_query))
        .route("/chatbot/api/history/:user_id", get(chat_history).delete(clear_history))
        .route("/chatbot/api/test", get(chat_test))
        .with_state(state)
        .layer(cors)
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
    pub(crate) faq: Arc<KnowledgeBase>,
    pub(crate) assistant: Arc<ChatAssistant>,
    pub(crate) history: Arc<HistoryStore>,
}

/// GET /api/v1/health – liveness check for UI and scripts.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/v1/status – app identity and loaded knowledge sizes.
async fn status(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "faq_entries": state.faq.len(),
        "ipc_sections": sections::SECTIONS.len(),
    }))
}

#[derive(serde::Deserialize)]
struct FaqRequest {
    query: String,
}

/// POST /api/v1/faq – raw FAQ matcher; `answer` is null when nothing matches.
async fn faq_lookup(
    State(state): State<AppState>,
    Json(req): Json<FaqRequest>,
) -> axum::Json<serde_json::Value> {
    let best = state.faq.best_match(&req.query);
    tracing::debug!(
        target: "fir::gateway",
        keyword = best.map(|m| m.keyword),
        "FAQ lookup"
    );
    axum::Json(serde_json::json!({
        "matched": best.is_some(),
        "answer": best.map(|m| m.answer),
    }))
}

/// GET /api/v1/sections – the full IPC catalog.
async fn list_sections() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "sections": sections::SECTIONS }))
}

/// GET /api/v1/sections/:code – one IPC section, 404 when unknown.
async fn get_section(Path(code): Path<String>) -> Result<axum::Json<serde_json::Value>, StatusCode> {
    let section = sections::lookup(&code).ok_or(StatusCode::NOT_FOUND)?;
    Ok(axum::Json(serde_json::json!({
        "section": section,
        "applies_to": sections::context(section.code),
    })))
}
