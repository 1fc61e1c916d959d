//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::CorsOrigins;
use crate::finder::{ConnectionFinder, FinderError, SearchResult};
use crate::transit::TransitProvider;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router<P: TransitProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/longest-direct", get(longest_direct::<P>))
        .with_state(state)
}

/// Create the router with request tracing and CORS applied.
pub fn create_app<P: TransitProvider + 'static>(state: AppState<P>, origins: &CorsOrigins) -> Router {
    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(origins))
}

/// Build the CORS layer: any method and header, no credentials.
pub fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|o| match o.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %o, "ignoring unparsable CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate::default()
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Longest direct regional connections from a station.
async fn longest_direct<P: TransitProvider + 'static>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Query(params): Query<LongestDirectParams>,
) -> Response {
    let html = accepts_html(&headers);

    let result = match search(&state, &params).await {
        Ok(result) => result,
        Err(e) if html => return e.into_html_response(),
        Err(e) => return e.into_response(),
    };

    // Return HTML or JSON based on Accept header
    if html {
        let template = ConnectionListTemplate {
            origin: result.origin.name().to_string(),
            connections: result
                .connections
                .iter()
                .map(ConnectionView::from_connection)
                .collect(),
        };

        match template.render() {
            Ok(page) => Html(page).into_response(),
            Err(e) => AppError::Internal {
                message: format!("Template error: {}", e),
            }
            .into_html_response(),
        }
    } else {
        Json(result.connections).into_response()
    }
}

async fn search<P: TransitProvider>(
    state: &AppState<P>,
    params: &LongestDirectParams,
) -> Result<SearchResult, AppError> {
    let request = params.to_request()?;
    let result = ConnectionFinder::new(state.transit.as_ref())
        .find(&request)
        .await?;

    info!(
        station = %request.station_query(),
        returned = result.connections.len(),
        "served longest-direct request"
    );
    Ok(result)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<FinderError> for AppError {
    fn from(e: FinderError) -> Self {
        let message = e.to_string();
        match e {
            FinderError::Validation(_) => AppError::BadRequest { message },
            FinderError::StationNotFound { .. } | FinderError::NoConnections { .. } => {
                AppError::NotFound { message }
            }
            FinderError::Upstream { .. } => AppError::BadGateway { message },
        }
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &str) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.as_str()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.as_str()),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message.as_str()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.as_str()),
        }
    }

    fn log(&self) {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(%status, detail = message, "request failed");
        } else {
            warn!(%status, detail = message, "request rejected");
        }
    }

    /// Render as an HTML error page with the same status.
    pub fn into_html_response(self) -> Response {
        self.log();
        let (status, message) = self.status_and_message();

        let title = status.canonical_reason().unwrap_or("Error").to_string();
        let template = ErrorTemplate {
            title,
            message: message.to_string(),
        };
        let page = template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));

        (status, Html(page)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let (status, message) = self.status_and_message();

        let body = Json(ErrorResponse {
            detail: message.to_string(),
        });
        (status, body).into_response()
    }
}
