//! Route table.
//!
//! # Responsibilities
//! - Name every public path once
//! - Map paths and methods to handlers
//! - Send everything else to the 404 page
//!
//! # Design Decisions
//! - Trailing slashes are part of the path (`/menu/`, not `/menu`)
//! - `/` and `/home/` both serve the landing page
//! - `/book/` only treats POST as a submission; other methods get the form
//! - Request metrics are attached as a route layer so they are labelled
//!   with the matched route, not the raw path

use axum::middleware;
use axum::routing::{any, get};
use axum::Router;

use crate::http::handlers;
use crate::http::server::AppState;
use crate::observability::metrics::track_requests;

pub const HOME: &str = "/";
pub const HOME_ALIAS: &str = "/home/";
pub const ABOUT: &str = "/about/";
pub const BOOK: &str = "/book/";
pub const MENU: &str = "/menu/";
pub const MENU_ITEM: &str = "/menu_item/{id}/";

/// Detail page path for menu item `id`.
pub fn menu_item_path(id: i64) -> String {
    format!("/menu_item/{id}/")
}

/// All site routes, before state and middleware are applied.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(HOME, any(handlers::home))
        .route(HOME_ALIAS, any(handlers::home))
        .route(ABOUT, any(handlers::about))
        .route(
            BOOK,
            get(handlers::book_form)
                .post(handlers::book_submit)
                .fallback(handlers::book_form),
        )
        .route(MENU, any(handlers::menu))
        .route(MENU_ITEM, any(handlers::menu_item))
        .route_layer(middleware::from_fn(track_requests))
        .fallback(handlers::not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_path_matches_route_shape() {
        assert_eq!(menu_item_path(999), "/menu_item/999/");
        assert_eq!(MENU_ITEM.replace("{id}", "999"), menu_item_path(999));
    }
}
