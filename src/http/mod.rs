//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, request span)
//!     → routing (route table)
//!     → handlers.rs (extractors: state, pending messages, path, form)
//!     → pages.rs (render or redirect decision, queued messages)
//!     → response.rs (HTML body, Location, message cookie)
//!     → Send to client
//! ```

pub mod handlers;
pub mod pages;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{AppError, Outcome, Reply, X_TEMPLATE};
pub use server::{AppState, HttpServer};
