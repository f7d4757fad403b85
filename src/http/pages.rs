//! Page logic for each route, free of HTTP plumbing.
//!
//! Every function takes the store seams it needs plus the already-extracted
//! request data and returns a [`Reply`]. Nothing here touches headers or
//! cookies, so the branching can be tested directly.

use std::collections::HashMap;

use crate::http::response::{AppError, Reply};
use crate::messages::Message;
use crate::observability::metrics;
use crate::restaurant::form::{self, BookingForm};
use crate::restaurant::{Catalog, Ledger, StoreError};
use crate::routing::router::{BOOK, MENU};
use crate::templates::View;

pub const INVALID_FORM_MESSAGE: &str = "Please correct the errors below.";
pub const BOOKING_FAILED_MESSAGE: &str = "We could not save your reservation. Please try again.";

/// Landing page.
pub fn home() -> Reply {
    Reply::render(View::Index)
}

/// Restaurant information.
pub fn about() -> Reply {
    Reply::render(View::About)
}

/// Empty booking form.
pub fn book_form() -> Reply {
    Reply::render(View::Book {
        form: BookingForm::empty(),
    })
}

/// Handle a booking submission.
///
/// Invalid input re-renders the form with errors. A stored booking redirects
/// back to the form with a success message. A store failure re-renders the
/// form with the submitted values so the guest can retry.
pub async fn book_submit(ledger: &dyn Ledger, raw: &HashMap<String, String>) -> Reply {
    let booking = match form::validate(raw) {
        Ok(booking) => booking,
        Err(form) => {
            tracing::debug!(errors = form.error_count(), "Booking form rejected");
            return Reply::render(View::Book { form }).with_message(Message::error(INVALID_FORM_MESSAGE));
        }
    };

    match ledger.create(booking).await {
        Ok(created) => {
            tracing::info!(
                booking_id = created.id,
                guest_number = created.guest_number,
                "Booking created"
            );
            metrics::record_booking_created();
            Reply::redirect(BOOK)
                .with_message(Message::success(format!("Success reservation for {created}!")))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save booking");
            metrics::record_storage_error("booking_create");
            Reply::render(View::Book {
                form: BookingForm::from_submission(raw),
            })
            .with_message(Message::error(BOOKING_FAILED_MESSAGE))
        }
    }
}

/// Full menu listing.
pub async fn menu(catalog: &dyn Catalog) -> Result<Reply, AppError> {
    let items = catalog.list_all().await.map_err(|e| {
        metrics::record_storage_error("menu_list");
        e
    })?;
    Ok(Reply::render(View::Menu { items }))
}

/// Menu item detail; a missing item sends the guest back to the menu.
pub async fn menu_item(catalog: &dyn Catalog, id: i64) -> Result<Reply, AppError> {
    match catalog.get_by_id(id).await {
        Ok(item) => Ok(Reply::render(View::MenuItem { item })),
        Err(StoreError::NotFound { .. }) => {
            tracing::debug!(menu_item_id = id, "Menu item not found, redirecting to menu");
            Ok(Reply::redirect(MENU)
                .with_message(Message::error(format!("Menu item with id {id} not found."))))
        }
        Err(e) => {
            metrics::record_storage_error("menu_item_get");
            Err(e.into())
        }
    }
}
