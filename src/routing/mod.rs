//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (route table)
//!     → http::handlers (extract state, messages, path, form)
//!     → http::pages (decide render or redirect)
//! ```
//!
//! # Design Decisions
//! - Routes are fixed at startup, immutable at runtime
//! - Paths are declared once as constants and reused for redirects and links

pub mod router;

pub use router::{menu_item_path, routes};
