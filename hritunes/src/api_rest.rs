//! Endpoint API REST pour la recherche de podcasts

use crate::error::ItunesError;
use crate::models::Podcast;
use crate::server_ext::ItunesState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

// ============ Gestion des erreurs ============

pub struct AppError(ItunesError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ItunesError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ItunesError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ItunesError::Http(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ItunesError::Http(_) => StatusCode::BAD_GATEWAY,
            ItunesError::Json(_) | ItunesError::InvalidUrl(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("iTunes search failed: {}", self.0);
        }

        let body = Json(serde_json::json!({
            "error": self.0.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<ItunesError> for AppError {
    fn from(err: ItunesError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Terme recherché
    q: Option<String>,
}

/// Crée le router pour l'API iTunes
pub fn create_router(state: ItunesState) -> Router {
    Router::new()
        .route("/search-podcasts", get(search_podcasts))
        .with_state(state)
}

/// GET /search-podcasts - Recherche de podcasts
#[utoipa::path(
    get,
    path = "/search-podcasts",
    params(SearchQuery),
    responses(
        (status = 200, description = "Podcasts trouvés", body = [Podcast]),
        (status = 400, description = "Missing 'q' parameter"),
        (status = 502, description = "Erreur iTunes")
    ),
    tag = "itunes"
)]
async fn search_podcasts(
    State(state): State<ItunesState>,
    Query(params): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let term = match params.q {
        Some(q) if !q.trim().is_empty() => q,
        _ => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "Missing 'q' parameter"})),
            )
                .into_response())
        }
    };

    let podcasts = state.client.search_podcasts(&term).await?;
    Ok(Json(podcasts).into_response())
}

/// API OpenAPI pour iTunes
#[derive(OpenApi)]
#[openapi(
    paths(search_podcasts),
    components(schemas(Podcast)),
    tags(
        (name = "itunes", description = "Recherche dans le catalogue de podcasts iTunes")
    )
)]
pub struct ItunesApiDoc;
