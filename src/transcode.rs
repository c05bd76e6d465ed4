// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

//! Markup source to preview HTML and to plain text.
//!
//! Both outputs are rendered from the same event stream: [`scanner::Scanner`]
//! recognizes constructs, [`table::TableRows`] regroups tabular content into
//! rows and cells, then [`html`] or [`plain`] formats the events.

pub mod event;
pub mod html;
pub mod plain;
pub mod scanner;
pub mod table;

use event::Event;
use scanner::Scanner;
use table::TableRows;

pub fn events(source: &str) -> impl Iterator<Item = Event<'_>> {
    TableRows::new(Scanner::new(source))
}

/// Render the source as a preview fragment: one paragraph container, or
/// [`html::PLACEHOLDER`] if nothing visible remains.
pub fn to_html(source: &str) -> String {
    let mut body = String::new();
    match html::push_html(&mut body, events(source)) {
        true => format!("<p>{}</p>", body),
        false => html::PLACEHOLDER.to_string(),
    }
}

/// Render the source as readable plain text. The result may be empty.
pub fn to_plain_text(source: &str) -> String {
    let mut text = String::new();
    plain::push_text(&mut text, events(source));
    plain::tidy(&text)
}
