//! Response building.
//!
//! # Responsibilities
//! - Carry a handler's decision (render a view or redirect) as plain data
//! - Merge carried-over and newly queued messages
//! - Write or clear the message cookie
//! - Map errors to the 404 and 500 pages
//!
//! # Design Decisions
//! - Redirects are 302 Found
//! - Rendering consumes messages; redirecting carries them forward
//! - Storage failures never reach the client verbatim

use axum::http::header::{HeaderName, HeaderValue, LOCATION, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::messages::{Message, MessageSigner, PendingMessages};
use crate::restaurant::StoreError;
use crate::templates::{self, View};

/// Response header naming the rendered template.
pub const X_TEMPLATE: HeaderName = HeaderName::from_static("x-template");

/// Errors a page handler does not recover from itself.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// What the handler decided to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render { view: View, status: StatusCode },
    Redirect { location: String },
}

/// A handler's result: an outcome plus messages queued for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    outcome: Outcome,
    messages: Vec<Message>,
}

impl Reply {
    /// Render `view` with 200 OK.
    pub fn render(view: View) -> Self {
        Self::render_with_status(view, StatusCode::OK)
    }

    pub fn render_with_status(view: View, status: StatusCode) -> Self {
        Self {
            outcome: Outcome::Render { view, status },
            messages: Vec::new(),
        }
    }

    /// Redirect (302) to `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Redirect {
                location: location.into(),
            },
            messages: Vec::new(),
        }
    }

    /// Queue a message for the next rendered page.
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn status(&self) -> StatusCode {
        match &self.outcome {
            Outcome::Render { status, .. } => *status,
            Outcome::Redirect { .. } => StatusCode::FOUND,
        }
    }

    /// The rendered view, if this reply renders one.
    pub fn view(&self) -> Option<&View> {
        match &self.outcome {
            Outcome::Render { view, .. } => Some(view),
            Outcome::Redirect { .. } => None,
        }
    }

    /// Turn the reply into an HTTP response.
    pub fn into_response(
        self,
        site_name: &str,
        signer: &MessageSigner,
        pending: PendingMessages,
    ) -> Response {
        let cookie_present = pending.cookie_present();
        let mut messages = pending.into_messages();
        messages.extend(self.messages);

        match self.outcome {
            Outcome::Render { view, status } => {
                let body = templates::render(site_name, &view, &messages);
                let mut response = (status, Html(body)).into_response();
                let headers = response.headers_mut();
                headers.insert(X_TEMPLATE, HeaderValue::from_static(view.template_name()));
                if cookie_present {
                    headers.insert(SET_COOKIE, MessageSigner::clear_cookie());
                }
                response
            }
            Outcome::Redirect { location } => {
                let mut response = StatusCode::FOUND.into_response();
                let headers = response.headers_mut();
                match HeaderValue::try_from(location) {
                    Ok(location) => {
                        headers.insert(LOCATION, location);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Redirect location is not a valid header");
                        return Reply::render_with_status(
                            View::ServerError,
                            StatusCode::INTERNAL_SERVER_ERROR,
                        )
                        .into_response(site_name, signer, PendingMessages::new(messages));
                    }
                }
                if !messages.is_empty() {
                    match signer.set_cookie(&messages) {
                        Ok(cookie) => {
                            headers.insert(SET_COOKIE, cookie);
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Dropping messages that could not be stored");
                        }
                    }
                } else if cookie_present {
                    headers.insert(SET_COOKIE, MessageSigner::clear_cookie());
                }
                response
            }
        }
    }
}

impl From<AppError> for Reply {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(what) => {
                tracing::debug!(what = %what, "Not found");
                Reply::render_with_status(View::NotFound, StatusCode::NOT_FOUND)
            }
            AppError::Storage(e) => {
                tracing::error!(error = %e, "Storage failure while handling request");
                Reply::render_with_status(View::ServerError, StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> MessageSigner {
        MessageSigner::new("response-test-secret")
    }

    #[test]
    fn test_render_clears_consumed_cookie() {
        let pending = PendingMessages::new(vec![Message::info("carried")]);
        let response = Reply::render(View::About).into_response("Little Lemon", &signer(), pending);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[X_TEMPLATE], "about.html");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_render_without_cookie_sets_nothing() {
        let response =
            Reply::render(View::Index).into_response("Little Lemon", &signer(), PendingMessages::default());
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[test]
    fn test_redirect_stores_messages() {
        let signer = signer();
        let response = Reply::redirect("/menu/")
            .with_message(Message::error("Menu item with id 999 not found."))
            .into_response("Little Lemon", &signer, PendingMessages::default());

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/menu/");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        let value = cookie
            .strip_prefix("messages=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        let stored = signer.decode(value).unwrap();
        assert_eq!(stored, vec![Message::error("Menu item with id 999 not found.")]);
    }

    #[test]
    fn test_storage_error_maps_to_500_page() {
        let reply = Reply::from(AppError::Storage(StoreError::Database(sqlx::Error::PoolClosed)));
        assert_eq!(reply.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.view(), Some(&View::ServerError));
    }
}
