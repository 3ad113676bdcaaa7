use crate::i18n;
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

/// Platform-supplied navigation links.
///
/// `ui` does not know each platform's `Route` enum, so launchers register a
/// builder whose closures wrap the localized label in a `Link` of their own:
///
/// ```ignore
/// use ui::components::app_navbar::{register_nav, NavBuilder};
/// register_nav(NavBuilder {
///     results: |label| rsx!( Link { class: "navbar__link", to: Route::SurveyResults {}, "{label}" } ),
///     about: |label| rsx!( Link { class: "navbar__link", to: Route::About {}, "{label}" } ),
/// });
/// ```
///
/// Without a builder the navbar falls back to its `children`.
pub struct NavBuilder {
    pub results: fn(label: &str) -> Element,
    pub about: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    i18n::init();

    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let mut current_lang = use_signal(|| {
        lang_code
            .map(|code| code())
            .unwrap_or_else(i18n::current_language)
    });
    let langs = use_signal(i18n::available_languages)();
    let show_switcher = langs.len() > 1;
    let lang_marker = lang_code.map(|code| code()).unwrap_or_default();

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        if i18n::set_language(&val).is_ok() {
            current_lang.set(val.clone());
            if let Some(mut code) = lang_code {
                code.set(val);
            }
        }
    };

    let internal_nav = NAV_BUILDER.get().map(|b| {
        let results = (b.results)(&t!("nav-results"));
        let about = (b.about)(&t!("nav-about"));
        rsx! {
            nav { class: "navbar__links",
                {results}
                {about}
            }
        }
    });

    rsx! {
        header { id: "navbar", class: "navbar",
            div { style: "display:none", "{lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-mark", "LessWrong.ru" }
                    span { class: "navbar__brand-subtitle", {t!("tagline")} }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }

                if show_switcher {
                    div { class: "navbar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            for code in langs.iter() {
                                option { key: "{code}", value: "{code}", "{code}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
