//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → body size limit (http::server, from SecurityConfig)
//!     → handlers
//! Outgoing response:
//!     → headers.rs (nosniff, frame denial, referrer policy)
//! ```
//!
//! # Design Decisions
//! - Output is HTML-escaped at render time (templates)
//! - Form input is checked for shape, type and length only

pub mod headers;

pub use headers::with_security_headers;
