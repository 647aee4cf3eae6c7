//! Flatwiki - a small wiki that keeps each page in a flat text file
//!
//! Pages live in `<data-dir>/<title>.txt` and are served through three
//! actions routed by path: `/view/<title>`, `/edit/<title>` and `/save/<title>`.

pub mod components;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod routing;
pub mod services;
pub mod strategies;
pub mod types;
pub mod utils;

use axum::{routing::{get, post}, Router};

// Re-export commonly used items
pub use components::Templates;
pub use config::Config;
pub use errors::WikiError;
pub use routing::{match_route, Action, Route};
pub use services::{MarkdownService, PageStore};
pub use strategies::{EditStrategy, ErrorStrategy, Flow, SaveStrategy, Strategy, ViewStrategy};
pub use types::{AppState, Page, Title};

/// Build the HTTP router for the wiki
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_root))
        .route("/pages", get(handlers::handle_index))
        .route("/view/*title", get(handlers::handle_view))
        .route("/edit/*title", get(handlers::handle_edit))
        .route("/save/*title", post(handlers::handle_save))
        .fallback(handlers::handle_not_found)
        .with_state(state)
}
