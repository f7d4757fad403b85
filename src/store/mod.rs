//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! DatabaseConfig
//!     → sqlite.rs (pool + embedded migrations from ./migrations)
//!     → SqliteStore (implements Catalog + Ledger, plus admin CRUD)
//!     → shared via Arc with the HTTP server
//! ```
//!
//! # Design Decisions
//! - Column length limits live in the schema as CHECK constraints
//! - Listings are ordered by id so results are stable
//! - In-memory URLs pin the pool to a single connection

pub mod sqlite;

pub use sqlite::SqliteStore;
