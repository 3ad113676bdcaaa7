use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::core::{ChartConfig, DisplayRules};
use ui::i18n;
use ui::views::{About, SurveyResults};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    SurveyResults {},
    #[route("/about")]
    About {},
}

fn nav_results(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::SurveyResults {},
        "{label}"
    })
}
fn nav_about(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::About {},
        "{label}"
    })
}

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already installed: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    i18n::init();
    register_nav(NavBuilder {
        results: nav_results,
        about: nav_about,
    });

    let lang_code = use_signal(i18n::current_language);
    use_context_provider(|| lang_code);
    use_context_provider(DisplayRules::default);
    use_context_provider(ChartConfig::default);

    rsx! {
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }

        // Remount every question on language change so per-question state resets.
        div { key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

/// Web layout: shared navbar above the routed page.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar {}
        Outlet::<Route> {}
    }
}
