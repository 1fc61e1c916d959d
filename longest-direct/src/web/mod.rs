//! Web layer for the longest direct connection finder.
//!
//! Serves the JSON API, a search form and server-rendered result pages,
//! all backed by the same finder.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, cors_layer, create_app, create_router};
pub use state::AppState;
