use dioxus::prelude::*;

use crate::core::dataset::SurveyGroup;
use crate::survey::{QuestionBlock, SurveyRef};

/// A titled section of question blocks, in `structure` order.
#[component]
pub fn QuestionGroup(index: usize, group: SurveyGroup, survey: SurveyRef) -> Element {
    let total = survey.total;

    rsx! {
        div { class: "group",
            hr {}
            h2 { id: "group-{index}", "{group.title}" }
            for column in group.columns.iter() {
                if let Some(dataset) = survey.question(column) {
                    QuestionBlock {
                        key: "{column}",
                        question: column.clone(),
                        dataset: dataset.clone(),
                        total,
                    }
                }
            }
        }
    }
}

/// Table of contents: one entry per group, nested entries per question.
#[component]
pub fn SurveyMenu(survey: SurveyRef) -> Element {
    rsx! {
        nav { class: "menu",
            ul { class: "menu--outer",
                for (index, group) in survey.structure.iter().enumerate() {
                    li { key: "{index}",
                        a { href: "#group-{index}", "{group.title}" }
                        ul { class: "menu--inner",
                            for column in group.columns.iter() {
                                if let Some(dataset) = survey.question(column) {
                                    li { key: "{column}",
                                        a { href: "#question-{column}", "{dataset.title}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
