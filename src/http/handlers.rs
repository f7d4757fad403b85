//! Axum handlers: extract request data, call the page logic, build the response.

use std::collections::HashMap;

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Form;

use crate::http::pages;
use crate::http::response::{AppError, Reply};
use crate::http::server::AppState;
use crate::messages::PendingMessages;

pub async fn home(State(state): State<AppState>, pending: PendingMessages) -> Response {
    state.respond(pending, pages::home())
}

pub async fn about(State(state): State<AppState>, pending: PendingMessages) -> Response {
    state.respond(pending, pages::about())
}

pub async fn book_form(State(state): State<AppState>, pending: PendingMessages) -> Response {
    state.respond(pending, pages::book_form())
}

/// A POST that is not url-encoded is an empty submission and fails validation.
pub async fn book_submit(
    State(state): State<AppState>,
    pending: PendingMessages,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let raw = match form {
        Ok(Form(raw)) => raw,
        Err(FormRejection::InvalidFormContentType(rejection)) => {
            tracing::debug!(error = %rejection, "Booking body is not url-encoded");
            HashMap::new()
        }
        Err(rejection) => return rejection.into_response(),
    };
    let reply = pages::book_submit(state.ledger.as_ref(), &raw).await;
    state.respond(pending, reply)
}

pub async fn menu(State(state): State<AppState>, pending: PendingMessages) -> Response {
    let reply = pages::menu(state.catalog.as_ref())
        .await
        .unwrap_or_else(Reply::from);
    state.respond(pending, reply)
}

/// `id` is taken as text so a non-numeric id gets the 404 page rather than a 400.
pub async fn menu_item(
    State(state): State<AppState>,
    pending: PendingMessages,
    Path(id): Path<String>,
) -> Response {
    let reply = match parse_menu_item_id(&id) {
        Some(id) => pages::menu_item(state.catalog.as_ref(), id).await,
        None => Err(AppError::NotFound(format!("menu item '{id}'"))),
    }
    .unwrap_or_else(Reply::from);
    state.respond(pending, reply)
}

/// Unknown paths. Pending messages stay in the cookie for the next real page.
pub async fn not_found(State(state): State<AppState>) -> Response {
    state.respond(
        PendingMessages::default(),
        Reply::from(AppError::NotFound("route".into())),
    )
}

/// Path ids are plain digits only; signs and other text do not match.
fn parse_menu_item_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_id_accepts_digits_only() {
        assert_eq!(parse_menu_item_id("42"), Some(42));
        assert_eq!(parse_menu_item_id("007"), Some(7));
        for raw in ["", "-1", "+1", " 1", "1.0", "pasta", "99999999999999999999"] {
            assert_eq!(parse_menu_item_id(raw), None, "{raw:?}");
        }
    }
}
