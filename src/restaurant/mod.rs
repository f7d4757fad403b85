//! Restaurant domain.
//!
//! # Data Flow
//! ```text
//! POST /book/ body (string mapping)
//!     → form.rs (required / integer / length checks)
//!     → NewBooking
//!     → Ledger::create (catalog.rs seam, store implements)
//!
//! GET /menu/, /menu_item/<id>/
//!     → Catalog::list_all / Catalog::get_by_id
//! ```
//!
//! # Design Decisions
//! - Menu items are read-only here; only `lemon-admin` writes them
//! - Bookings and menu items are unrelated tables
//! - Only shape, type and length are validated

pub mod catalog;
pub mod form;
pub mod models;
pub mod validation;

pub use catalog::{Catalog, Ledger, StoreError, StoreResult};
pub use form::BookingForm;
pub use models::{Booking, MenuItem, MenuItemUpdate, NewBooking, NewMenuItem};
