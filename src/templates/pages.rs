//! Page bodies, one per view.

use crate::restaurant::form::{FieldKind, FieldSpec, BOOKING_FIELDS};
use crate::restaurant::{BookingForm, MenuItem};
use crate::routing::router::{menu_item_path, BOOK, HOME, MENU};
use crate::templates::{escape, View};

pub(super) fn content(site_name: &str, view: &View) -> String {
    match view {
        View::Index => index(site_name),
        View::About => about(site_name),
        View::Book { form } => book(form),
        View::Menu { items } => menu(items),
        View::MenuItem { item } => menu_item(item),
        View::NotFound => not_found(),
        View::ServerError => server_error(),
    }
}

fn index(site_name: &str) -> String {
    format!(
        "<section class=\"hero\">\n<h1>{}</h1>\n<p>A family owned Mediterranean restaurant, \
         focused on traditional recipes served with a modern twist.</p>\n\
         <p><a class=\"button\" href=\"{BOOK}\">Reserve a table</a> \
         <a class=\"button\" href=\"{MENU}\">See the menu</a></p>\n</section>\n",
        escape(site_name)
    )
}

fn about(site_name: &str) -> String {
    format!(
        "<section class=\"about\">\n<h1>About {}</h1>\n<p>We are a neighbourhood restaurant \
         cooking seasonal dishes from family recipes. Walk-ins are welcome, and reservations \
         can be made online.</p>\n</section>\n",
        escape(site_name)
    )
}

fn book(form: &BookingForm) -> String {
    let mut html = String::from("<section class=\"booking\">\n<h1>Reserve a table</h1>\n");
    html.push_str(&format!("<form method=\"post\" action=\"{BOOK}\" novalidate>\n"));
    for field in &BOOKING_FIELDS {
        html.push_str(&form_field(form, field));
    }
    html.push_str("<button type=\"submit\">Reserve</button>\n</form>\n</section>\n");
    html
}

fn form_field(form: &BookingForm, field: &FieldSpec) -> String {
    let id = format!("id_{}", field.name);
    let value = escape(form.value(field.name));
    let maxlength = field
        .max_len
        .map(|max| format!(" maxlength=\"{max}\""))
        .unwrap_or_default();

    let input = match field.kind {
        FieldKind::Text => format!(
            "<input type=\"text\" name=\"{}\" id=\"{id}\"{maxlength} value=\"{value}\" required>",
            field.name
        ),
        FieldKind::Integer => format!(
            "<input type=\"number\" name=\"{}\" id=\"{id}\" value=\"{value}\" required>",
            field.name
        ),
        FieldKind::TextArea => format!(
            "<textarea name=\"{}\" id=\"{id}\"{maxlength}>{value}</textarea>",
            field.name
        ),
    };

    let mut html = format!(
        "<div class=\"field\">\n<label for=\"{id}\">{}:</label>\n{input}\n",
        field.label
    );
    let errors = form.errors(field.name);
    if !errors.is_empty() {
        html.push_str("<ul class=\"errorlist\">");
        for error in errors {
            html.push_str(&format!("<li>{}</li>", escape(error)));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</div>\n");
    html
}

fn menu(items: &[MenuItem]) -> String {
    let mut html = String::from("<section class=\"menu\">\n<h1>Menu</h1>\n");
    if items.is_empty() {
        html.push_str("<p>No menu items yet.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for item in items {
            html.push_str(&format!(
                "<li class=\"menu-item\"><a href=\"{}\">{}</a> <span class=\"price\">${}</span></li>\n",
                menu_item_path(item.id),
                escape(&item.name),
                item.price
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");
    html
}

fn menu_item(item: &MenuItem) -> String {
    let mut html = format!(
        "<article class=\"menu-item-detail\">\n<h1>{}</h1>\n",
        escape(&item.name)
    );
    if !item.description.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", escape(&item.description)));
    }
    html.push_str(&format!(
        "<p class=\"price\">${}</p>\n<p><a href=\"{MENU}\">Back to the menu</a></p>\n</article>\n",
        item.price
    ));
    html
}

fn not_found() -> String {
    format!(
        "<section class=\"error\">\n<h1>Page not found</h1>\n\
         <p>The page you asked for does not exist. <a href=\"{HOME}\">Go home</a>.</p>\n</section>\n"
    )
}

fn server_error() -> String {
    "<section class=\"error\">\n<h1>Something went wrong</h1>\n\
     <p>We could not load this page. Please try again in a moment.</p>\n</section>\n"
        .to_string()
}
