//! Booking form binding and validation.
//!
//! A submission arrives as a flat string mapping. [`validate`] either turns it
//! into a [`NewBooking`] or hands back a [`BookingForm`] holding the submitted
//! values and the per-field errors, ready to be rendered again. Every request
//! gets its own form value; nothing is kept between requests.

use std::collections::{BTreeMap, HashMap};

use crate::restaurant::models::NewBooking;
use crate::restaurant::validation::{
    length_error, INTEGER_MESSAGE, MAX_COMMENT_LEN, MAX_GUEST_NAME_LEN, REQUIRED_MESSAGE,
};

/// How a field is entered and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    TextArea,
}

/// Static description of a booking form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub max_len: Option<usize>,
}

/// Booking fields in display order.
pub const BOOKING_FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        name: "first_name",
        label: "First name",
        kind: FieldKind::Text,
        max_len: Some(MAX_GUEST_NAME_LEN),
    },
    FieldSpec {
        name: "last_name",
        label: "Last name",
        kind: FieldKind::Text,
        max_len: Some(MAX_GUEST_NAME_LEN),
    },
    FieldSpec {
        name: "guest_number",
        label: "Guest number",
        kind: FieldKind::Integer,
        max_len: None,
    },
    FieldSpec {
        name: "comment",
        label: "Comment",
        kind: FieldKind::TextArea,
        max_len: Some(MAX_COMMENT_LEN),
    },
];

/// Booking form state for rendering: echoed values plus field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    values: BTreeMap<&'static str, String>,
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl BookingForm {
    /// An unbound form with no values.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A form echoing `raw` without any field errors.
    pub fn from_submission(raw: &HashMap<String, String>) -> Self {
        let values = BOOKING_FIELDS
            .iter()
            .filter_map(|field| raw.get(field.name).map(|v| (field.name, v.clone())))
            .collect();
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }

    /// Submitted value for `field`, or empty.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Errors attached to `field`.
    pub fn errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    fn add_error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    /// Trimmed, required, length-checked text value.
    fn clean_text(&mut self, field: &FieldSpec) -> Option<String> {
        let value = self.value(field.name).trim().to_string();
        if value.is_empty() {
            self.add_error(field.name, REQUIRED_MESSAGE);
            return None;
        }
        if let Some(message) = field.max_len.and_then(|max| length_error(&value, max)) {
            self.add_error(field.name, message);
            return None;
        }
        Some(value)
    }

    fn clean_integer(&mut self, field: &FieldSpec) -> Option<i64> {
        let value = self.value(field.name).trim().to_string();
        if value.is_empty() {
            self.add_error(field.name, REQUIRED_MESSAGE);
            return None;
        }
        match value.parse::<i64>() {
            Ok(number) => Some(number),
            Err(_) => {
                self.add_error(field.name, INTEGER_MESSAGE);
                None
            }
        }
    }
}

/// Validate a raw booking submission.
///
/// All four fields are checked so the returned form lists every problem at
/// once. Only shape, type and length are checked; any integer party size is
/// accepted.
pub fn validate(raw: &HashMap<String, String>) -> Result<NewBooking, BookingForm> {
    let mut form = BookingForm::from_submission(raw);
    let [first, last, guests, comment] = &BOOKING_FIELDS;

    let first_name = form.clean_text(first);
    let last_name = form.clean_text(last);
    let guest_number = form.clean_integer(guests);
    let comment = form.clean_text(comment);

    match (first_name, last_name, guest_number, comment) {
        (Some(first_name), Some(last_name), Some(guest_number), Some(comment)) => Ok(NewBooking {
            first_name,
            last_name,
            guest_number,
            comment,
        }),
        _ => Err(form),
    }
}
