use dioxus::prelude::*;

use crate::survey::{QuestionGroup, SurveyMenu, SurveyState};
use crate::t;

#[component]
pub fn SurveyResults() -> Element {
    // Re-render on language change when the platform provides the code signal.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang = lang_code.map(|code| code()).unwrap_or_default();

    let state = use_hook(SurveyState::load);

    let Some(survey) = state.survey else {
        let error = state.error.unwrap_or_default();
        return rsx! {
            section { class: "page page-survey",
                h1 { {t!("survey-title")} }
                div { class: "survey-error",
                    p { {t!("survey-load-error", error = error)} }
                }
            }
        };
    };

    rsx! {
        section { class: "page page-survey",
            h1 { {t!("survey-title")} }
            div { class: "stats", {t!("survey-total", total = survey.total)} }

            h2 { class: "menu--title", {t!("survey-menu-label")} }
            SurveyMenu { survey }

            for (index, group) in survey.structure.iter().enumerate() {
                QuestionGroup {
                    key: "{index}",
                    index,
                    group: group.clone(),
                    survey,
                }
            }
        }
    }
}
