//! HTML projection of [`DisplayState`]. All interpolated text goes through
//! askama's HTML escaping, including attribute values.

use askama::Template;
use client_core::Notice;

use crate::render::{ActivityCard, DisplayState, ListRegion, SelectOption, LOADING_MESSAGE};

pub const PAGE_TITLE: &str = "Mergington High School Activities";

#[derive(Template)]
#[template(path = "activity_cards.html")]
struct ActivityCardsTemplate<'a> {
    cards: &'a [ActivityCard],
}

#[derive(Template)]
#[template(path = "paragraph.html")]
struct ParagraphTemplate<'a> {
    text: &'a str,
}

#[derive(Template)]
#[template(path = "activity_options.html")]
struct ActivityOptionsTemplate<'a> {
    options: &'a [SelectOption],
    selected: &'a str,
}

#[derive(Template)]
#[template(path = "message.html")]
struct MessageTemplate<'a> {
    class: String,
    text: &'a str,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    email: &'a str,
    list_html: &'a str,
    options_html: &'a str,
    message_html: &'a str,
}

/// Form values echoed back into the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValues<'a> {
    pub activity: &'a str,
    pub email: &'a str,
}

/// Contents of the `activities-list` element.
pub fn activities_list(list: &ListRegion) -> askama::Result<String> {
    match list {
        ListRegion::Loading => ParagraphTemplate {
            text: LOADING_MESSAGE,
        }
        .render(),
        ListRegion::Activities(cards) => ActivityCardsTemplate { cards }.render(),
        ListRegion::Failed(message) => ParagraphTemplate { text: message }.render(),
    }
}

/// Contents of the `activity` select element.
pub fn activity_options(options: &[SelectOption], selected: &str) -> askama::Result<String> {
    ActivityOptionsTemplate { options, selected }.render()
}

/// The `message` element. Hidden when no notice is visible.
pub fn message_region(notice: &Notice) -> askama::Result<String> {
    let (kind, text) = match notice.message() {
        Some(message) => (message.kind.as_str(), message.text.as_str()),
        None => ("", ""),
    };
    let class = if notice.is_visible() {
        kind.to_string()
    } else if kind.is_empty() {
        "hidden".to_string()
    } else {
        format!("{kind} hidden")
    };
    MessageTemplate { class, text }.render()
}

pub fn page(display: &DisplayState, form: FormValues<'_>, notice: &Notice) -> askama::Result<String> {
    let list_html = activities_list(display.list())?;
    let options_html = activity_options(display.selector(), form.activity)?;
    let message_html = message_region(notice)?;
    PageTemplate {
        title: PAGE_TITLE,
        email: form.email,
        list_html: &list_html,
        options_html: &options_html,
        message_html: &message_html,
    }
    .render()
}

#[cfg(test)]
#[path = "tests/markup_tests.rs"]
mod tests;
