//! HTTP compile service and static host for the editor front-end.
//!
//! Routes:
//! - `POST /compile`: `{"code": ...}` in, `CompileResponse` out, always 200
//! - `GET /health`: liveness
//! - `GET /examples/{name}`: bundled sample sources
//! - anything else: files under the static directory, `index.html` fallback

use anyhow::{Context, Result};
use axum::extract::{Path as UrlPath, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use soldeploy_core::compiler::{compile_source, CompileRequest, CompileResponse, Solc, SolidityCompiler};
use soldeploy_core::{samples, Error};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::{lookup_host, TcpListener};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

const COMPILE_ENDPOINT: &str = "/compile";
const HEALTH_ENDPOINT: &str = "/health";
const EXAMPLES_ENDPOINT: &str = "/examples/{name}";
const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone)]
/// Listen address, compiler binary and front-end location.
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub solc: PathBuf,
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            solc: PathBuf::from("solc"),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Resolve `bind` (an IP literal or a host name) with `port`.
    async fn socket_addr(&self) -> Result<SocketAddr> {
        let invalid = || {
            format!(
                "invalid listen address '{}:{}': expected host:port",
                self.bind, self.port
            )
        };
        lookup_host((self.bind.as_str(), self.port))
            .await
            .with_context(invalid)?
            .next()
            .with_context(invalid)
    }
}

#[derive(Clone)]
struct AppState {
    compiler: Arc<dyn SolidityCompiler>,
}

/// Run the compile service until Ctrl-C.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let bind_addr = config.socket_addr().await?;
    if let Some(dir) = &config.static_dir {
        if !dir.join(INDEX_FILE).exists() {
            tracing::warn!(dir = %dir.display(), "static directory has no index.html");
        }
    }

    let compiler: Arc<dyn SolidityCompiler> = Arc::new(Solc::new(config.solc.clone()));
    let app = build_router(compiler, config.static_dir.as_deref());

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind compile service on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve compile service listen address")?;

    tracing::info!(
        addr = %local_addr,
        solc = %config.solc.display(),
        static_dir = ?config.static_dir,
        "compile service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("compile service exited unexpectedly")?;
    Ok(())
}

/// Assemble the router around any compiler implementation.
pub fn build_router(compiler: Arc<dyn SolidityCompiler>, static_dir: Option<&Path>) -> Router {
    let state = Arc::new(AppState { compiler });
    let router = Router::new()
        .route(COMPILE_ENDPOINT, post(handle_compile))
        .route(HEALTH_ENDPOINT, get(handle_health))
        .route(EXAMPLES_ENDPOINT, get(handle_example))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir)
                .append_index_html_on_directories(true)
                .fallback(ServeFile::new(dir.join(INDEX_FILE))),
        ),
        None => router,
    };

    router.layer(CorsLayer::permissive())
}

async fn handle_health() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

async fn handle_compile(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompileRequest>,
) -> Response {
    let started = Instant::now();
    let compiler = state.compiler.clone();
    let source_bytes = request.code.len();

    let result = tokio::task::spawn_blocking(move || compile_source(compiler.as_ref(), &request.code))
        .await
        .unwrap_or_else(|join_error| {
            tracing::error!(error = %join_error, "compile task did not complete");
            Err(Error::CompilerUnavailable(join_error.to_string()))
        });

    if let Err(error) = &result {
        if !error.is_source_error() {
            tracing::warn!(%error, "compiler failure");
        }
    }

    let response = CompileResponse::from_result(result);
    tracing::info!(
        success = response.success,
        source_bytes,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "compile request"
    );
    (StatusCode::OK, Json(response)).into_response()
}

async fn handle_example(UrlPath(name): UrlPath<String>) -> Response {
    match samples::find(&name) {
        Some(sample) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            sample.source,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("unknown example '{name}'") })),
        )
            .into_response(),
    }
}
