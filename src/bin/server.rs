use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use circuitgen::config::Params;
use circuitgen::router::Wire;

/// Server settings read from the environment.
struct ServerConfig {
    addr: SocketAddr,
    log_level: String,
    frontend_dir: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        let addr = std::env::var("CIRCUITGEN_ADDR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));
        Self {
            addr,
            log_level: std::env::var("CIRCUITGEN_LOG").unwrap_or_else(|_| "info".into()),
            frontend_dir: std::env::var("CIRCUITGEN_FRONTEND")
                .unwrap_or_else(|_| "frontend".into()),
        }
    }
}

#[derive(Deserialize)]
struct GenerateRequest {
    seed: Option<u64>,
    width: Option<f32>,
    height: Option<f32>,
    cell_size: Option<f32>,
    max_wire_len: Option<usize>,
    leave: Option<usize>,
}

#[derive(Serialize)]
struct GenerateResponse {
    svg: String,
    png_data_url: Option<String>,
    wires: Vec<Wire>,
    rows: usize,
    cols: usize,
    target: usize,
    timings: Vec<TimingEntry>,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<String, image::ImageError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

async fn generate_handler(
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let defaults = Params::default();
    let seed = req.seed.unwrap_or(42);
    let width = req.width.unwrap_or(1280.0);
    let height = req.height.unwrap_or(720.0);
    let params = Params {
        cell_size: req.cell_size.unwrap_or(defaults.cell_size),
        max_wire_len: req.max_wire_len.unwrap_or(defaults.max_wire_len),
        leave: req.leave.unwrap_or(defaults.leave),
        ..defaults
    };

    // Each request routes on its own grid; a superseded request is simply
    // dropped by the client.
    let response = tokio::task::spawn_blocking(move || {
        let (circuit, timings) = circuitgen::generate(seed, width, height, &params)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let layout = circuit.layout;

        let png_data_url = if circuit.rgba.is_empty() {
            None
        } else {
            let url = encode_png(&circuit.rgba, layout.width as usize, layout.height as usize)
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            Some(url)
        };

        Ok::<_, ApiError>(GenerateResponse {
            svg: circuit.svg,
            png_data_url,
            wires: layout.wires,
            rows: layout.rows,
            cols: layout.cols,
            target: layout.target,
            timings: timings
                .iter()
                .map(|t| TimingEntry {
                    name: t.name.to_string(),
                    ms: t.ms,
                })
                .collect(),
        })
    })
    .await
    .map_err(|e| {
        error!(error = %e, "generation task failed");
        ApiError::Internal(e.to_string())
    })??;

    info!(
        seed,
        rows = response.rows,
        cols = response.cols,
        wires = response.wires.len(),
        "generated"
    );
    Ok(Json(response))
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::from_env();

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let frontend = ServeDir::new(&config.frontend_dir);

    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        .fallback_service(frontend)
        .layer(CorsLayer::permissive());

    info!("circuitgen server at http://{}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await
}
