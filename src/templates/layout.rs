//! Base document shared by every page.

use crate::messages::Message;
use crate::routing::router::{ABOUT, BOOK, HOME, MENU};
use crate::templates::escape;

const NAV: [(&str, &str); 4] = [(HOME, "Home"), (ABOUT, "About"), (MENU, "Menu"), (BOOK, "Book")];

pub(super) fn base(site_name: &str, title: &str, messages: &[Message], content: &str) -> String {
    let site = escape(site_name);
    let mut html = String::with_capacity(content.len() + 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{} | {site}</title>\n", escape(title)));
    html.push_str("</head>\n<body>\n<header>\n");
    html.push_str(&format!("<a class=\"brand\" href=\"{HOME}\">{site}</a>\n<nav><ul>\n"));
    for (href, label) in NAV {
        html.push_str(&format!("<li><a href=\"{href}\">{label}</a></li>\n"));
    }
    html.push_str("</ul></nav>\n</header>\n");

    if !messages.is_empty() {
        html.push_str("<ul class=\"messages\">\n");
        for message in messages {
            html.push_str(&format!(
                "<li class=\"{}\">{}</li>\n",
                message.level.as_str(),
                escape(&message.text)
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<main>\n");
    html.push_str(content);
    html.push_str("</main>\n");
    html.push_str(&format!("<footer><p>&copy; {site}</p></footer>\n"));
    html.push_str("</body>\n</html>\n");
    html
}
