use dioxus::prelude::*;

use crate::core::dataset::SURVEY;
use crate::t;

const PREVIOUS_CENSUSES: &[(&str, &str)] = &[
    ("2015", "https://lesswrong.ru/survey/2015/"),
    ("2016", "https://lesswrong.ru/survey/2016/"),
];

#[component]
pub fn About() -> Element {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang = lang_code.map(|code| code()).unwrap_or_default();

    let total = SURVEY.as_ref().map(|survey| survey.total).ok();

    rsx! {
        section { class: "page page-about", id: "intro",
            h1 { {t!("about-title")} }
            p { {t!("about-held")} }
            p {
                a { href: "original-survey.pdf", {t!("about-original")} }
            }
            p { {t!("about-processing")} }
            p {
                {t!("about-previous")}
                " "
                for (year, href) in PREVIOUS_CENSUSES.iter() {
                    a { key: "{year}", class: "about__year", href: "{href}", "{year}" }
                    " "
                }
            }
            if let Some(total) = total {
                div { class: "stats", {t!("survey-total", total = total)} }
            }
        }
    }
}
