//! Endpoints API REST pour Navidrome
//!
//! Proxy en lecture seule : la liste des playlists et les pochettes. Les
//! identifiants Navidrome ne quittent jamais le serveur.

use crate::error::NavidromeError;
use crate::models::Playlist;
use crate::server_ext::NavidromeState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

const DEFAULT_COVER_CONTENT_TYPE: &str = "image/jpeg";

// ============ Gestion des erreurs ============

pub struct AppError(NavidromeError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            NavidromeError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            NavidromeError::NotFound(_) => StatusCode::NOT_FOUND,
            NavidromeError::Http(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            NavidromeError::Http(_) => StatusCode::BAD_GATEWAY,
            NavidromeError::Configuration(_)
            | NavidromeError::Json(_)
            | NavidromeError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!("Navidrome request failed: {}", self.0);

        let body = Json(serde_json::json!({
            "error": self.0.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<NavidromeError> for AppError {
    fn from(err: NavidromeError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CoverArtQuery {
    /// Identifiant de la pochette (`coverArt` d'une playlist)
    id: Option<String>,
    /// Taille en pixels, ignorée si invalide
    size: Option<String>,
}

/// Crée le router pour l'API Navidrome
pub fn create_router(state: NavidromeState) -> Router {
    Router::new()
        .route("/fetch-playlists", get(fetch_playlists))
        .route("/get-cover-art", get(get_cover_art))
        .with_state(state)
}

/// GET /fetch-playlists - Liste des playlists Navidrome
#[utoipa::path(
    get,
    path = "/fetch-playlists",
    responses(
        (status = 200, description = "Playlists", body = [Playlist]),
        (status = 502, description = "Erreur Navidrome")
    ),
    tag = "navidrome"
)]
async fn fetch_playlists(
    State(state): State<NavidromeState>,
) -> Result<Json<Vec<Playlist>>, AppError> {
    let playlists = state.client.get_playlists().await?;
    Ok(Json(playlists))
}

/// GET /get-cover-art - Image d'une pochette
#[utoipa::path(
    get,
    path = "/get-cover-art",
    params(CoverArtQuery),
    responses(
        (status = 200, description = "Image", content_type = "image/jpeg"),
        (status = 400, description = "Missing cover art ID"),
        (status = 404, description = "Pochette inconnue"),
        (status = 502, description = "Erreur Navidrome")
    ),
    tag = "navidrome"
)]
async fn get_cover_art(
    State(state): State<NavidromeState>,
    Query(params): Query<CoverArtQuery>,
) -> Result<Response, AppError> {
    let id = match params.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Ok((StatusCode::BAD_REQUEST, "Missing cover art ID").into_response()),
    };
    let size = params.size.as_deref().and_then(parse_size);

    let cover = state.client.get_cover_art(&id, size).await?;
    let content_type = cover
        .content_type
        .filter(|ct| ct.starts_with("image/"))
        .unwrap_or_else(|| DEFAULT_COVER_CONTENT_TYPE.to_string());

    Ok(([(header::CONTENT_TYPE, content_type)], cover.bytes).into_response())
}

/// Chiffres en tête de `size` ("64px" donne 64), `None` sinon
fn parse_size(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}

/// API OpenAPI pour Navidrome
#[derive(OpenApi)]
#[openapi(
    paths(fetch_playlists, get_cover_art),
    components(schemas(Playlist)),
    tags(
        (name = "navidrome", description = "Proxy vers le serveur Navidrome")
    )
)]
pub struct NavidromeApiDoc;
