use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::core::dataset::QuestionDataset;
use crate::core::listing::{other_lines, text_lines, visual_for, QuestionVisual};
use crate::core::rules::DisplayRules;
use crate::survey::{HistogramChart, OtherValues, TextListing};
use crate::t;

/// One question: title, notes, its visual and any free-text answers.
#[component]
pub fn QuestionBlock(question: String, dataset: QuestionDataset, total: u32) -> Element {
    let rules = try_use_context::<DisplayRules>().unwrap_or_default();
    let show_other = use_signal(|| false);

    let title = match rules.split_dual_title(&question, &dataset.title) {
        Some(dual) => rsx! {
            h3 { class: "dual",
                span { class: "dual--cat", "{dual.category}:" }
                br {}
                span { class: "dual--item", "{dual.item}" }
            }
        },
        None => rsx! {
            h3 { "{dataset.title}" }
        },
    };

    let visual = visual_for(&dataset.show);
    if visual == QuestionVisual::Nothing {
        warn!(question = %question, show = ?dataset.show, "unknown show type; nothing rendered");
    }

    let chart = match visual {
        QuestionVisual::Histogram => rsx! {
            HistogramChart { question: question.clone(), dataset: dataset.clone(), total }
        },
        QuestionVisual::TextListing | QuestionVisual::Nothing => rsx! {},
    };

    let listing: Option<Vec<String>> = (visual == QuestionVisual::TextListing)
        .then(|| text_lines(&dataset).into_iter().map(str::to_string).collect());
    let other: Option<Vec<String>> = other_lines(&dataset).map(<[String]>::to_vec);

    rsx! {
        section { id: "question-{question}", class: "block",
            {title}
            if let Some(note) = dataset.note.as_ref() {
                small { class: "note", "{note}" }
            }
            if dataset.multiple {
                small { class: "note", {t!("note-multiple")} }
            }
            div { class: "chart", {chart} }
            if let Some(values) = other {
                OtherValues { values, expanded: show_other }
            }
            if let Some(lines) = listing {
                TextListing { lines }
            }
        }
    }
}
