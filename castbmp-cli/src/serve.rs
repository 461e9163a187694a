use crate::raster::encode_png;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use castbmp::{DecodeError, DecodeOptions, Palette, RenderStyle};
use snafu::{ResultExt, Snafu};
use std::{collections::HashMap, net::SocketAddr, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    palette: Arc<Palette>,
    options: DecodeOptions,
}

impl AppState {
    pub fn new(palette: Palette, options: DecodeOptions) -> Self {
        Self {
            palette: Arc::new(palette),
            options,
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ServiceError {
    #[snafu(display("failed to decode photo: {source}"))]
    Decode { source: DecodeError },
    #[snafu(display("failed to encode png: {source}"))]
    Encode { source: image::ImageError },
    #[snafu(display("render task failed: {source}"))]
    Task { source: tokio::task::JoinError },
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "render failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Every path and method renders the request body.
pub fn router(state: AppState) -> Router {
    Router::new().fallback(render_photo).with_state(state)
}

pub async fn run(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("server started at http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

async fn render_photo(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let style = RenderStyle::from_query(params.get("style").map(String::as_str));
    tracing::info!(?style, bytes = body.len(), "request received");

    let png = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ServiceError> {
        let image = castbmp::render(&body, &state.palette, style, &state.options)
            .context(DecodeSnafu)?;
        encode_png(&image).context(EncodeSnafu)
    })
    .await
    .context(TaskSnafu)??;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
