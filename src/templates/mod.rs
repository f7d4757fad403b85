//! HTML rendering.
//!
//! # Data Flow
//! ```text
//! View (template name + context)
//!     → pages.rs (page body for that view)
//!     → layout.rs (base document, navigation, message list)
//!     → String body for the response
//! ```
//!
//! # Design Decisions
//! - Every dynamic string goes through `escape`
//! - Views are plain data so handlers can be tested without HTML

mod layout;
mod pages;

use crate::messages::Message;
use crate::restaurant::{BookingForm, MenuItem};

/// A page to render together with its context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Index,
    About,
    Book { form: BookingForm },
    Menu { items: Vec<MenuItem> },
    MenuItem { item: MenuItem },
    NotFound,
    ServerError,
}

impl View {
    /// Template name, reported in the `x-template` response header.
    pub fn template_name(&self) -> &'static str {
        match self {
            View::Index => "index.html",
            View::About => "about.html",
            View::Book { .. } => "book.html",
            View::Menu { .. } => "menu.html",
            View::MenuItem { .. } => "menu_item.html",
            View::NotFound => "404.html",
            View::ServerError => "500.html",
        }
    }

    fn title(&self) -> String {
        match self {
            View::Index => "Home".to_string(),
            View::About => "About".to_string(),
            View::Book { .. } => "Reservations".to_string(),
            View::Menu { .. } => "Menu".to_string(),
            View::MenuItem { item } => item.name.clone(),
            View::NotFound => "Page not found".to_string(),
            View::ServerError => "Something went wrong".to_string(),
        }
    }
}

/// Render `view` inside the site layout, showing `messages`.
pub fn render(site_name: &str, view: &View, messages: &[Message]) -> String {
    let content = pages::content(site_name, view);
    layout::base(site_name, &view.title(), messages, &content)
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x & y's")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; y&#x27;s&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_messages_are_listed_with_level() {
        let html = render(
            "Little Lemon",
            &View::Index,
            &[Message::success("Success reservation for Sarah Connor!")],
        );
        assert!(html.contains(r#"<li class="success">Success reservation for Sarah Connor!</li>"#));
        assert!(html.contains("<title>Home | Little Lemon</title>"));
    }

    #[test]
    fn test_menu_item_fields_are_escaped() {
        let item = MenuItem {
            id: 3,
            name: "Fish & Chips".into(),
            price: 14,
            description: "<b>crispy</b>".into(),
        };
        let html = render("Little Lemon", &View::MenuItem { item }, &[]);
        assert!(html.contains("Fish &amp; Chips"));
        assert!(html.contains("&lt;b&gt;crispy&lt;/b&gt;"));
        assert!(!html.contains("<b>crispy</b>"));
    }

    #[test]
    fn test_menu_lists_links() {
        let items = vec![
            MenuItem {
                id: 1,
                name: "Pasta".into(),
                price: 12,
                description: String::new(),
            },
            MenuItem {
                id: 2,
                name: "Salad".into(),
                price: 8,
                description: String::new(),
            },
        ];
        let html = render("Little Lemon", &View::Menu { items }, &[]);
        assert!(html.contains(r#"<a href="/menu_item/1/">Pasta</a>"#));
        assert!(html.contains(r#"<a href="/menu_item/2/">Salad</a>"#));
        assert_eq!(html.matches(r#"class="menu-item""#).count(), 2);
    }

    #[test]
    fn test_book_form_echoes_values_and_errors() {
        let raw: HashMap<String, String> = [
            ("first_name", ""),
            ("last_name", "O\"Brien"),
            ("guest_number", "2"),
            ("comment", "Test"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let form = crate::restaurant::form::validate(&raw).unwrap_err();

        let html = render("Little Lemon", &View::Book { form }, &[]);
        assert!(html.contains(r#"value="O&quot;Brien""#));
        assert!(html.contains(r#"<ul class="errorlist"><li>This field is required.</li></ul>"#));
        assert!(html.contains(r#"<textarea name="comment" id="id_comment" maxlength="1000">Test</textarea>"#));
    }
}
