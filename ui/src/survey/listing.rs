use dioxus::prelude::*;

use crate::t;

/// Literal listing of free-text answers, one per line.
#[component]
pub fn TextListing(lines: Vec<String>) -> Element {
    rsx! {
        div { class: "text-data",
            for (index, line) in lines.into_iter().enumerate() {
                div { key: "{index}", class: "text-data--item", "{line}" }
            }
        }
    }
}

/// Answers that did not fit any histogram bucket, hidden behind a link until
/// the reader asks for them.
#[component]
pub fn OtherValues(values: Vec<String>, expanded: Signal<bool>) -> Element {
    let mut expanded = expanded;
    if expanded() {
        return rsx! {
            TextListing { lines: values }
        };
    }

    let count = values.len();
    rsx! {
        div { class: "text-data",
            button {
                r#type: "button",
                class: "show-other-link",
                onclick: move |_| expanded.set(true),
                {t!("other-show", count = count)}
            }
        }
    }
}
