#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
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
    #[layout(DesktopNavbar)]
    #[route("/")]
    SurveyResults {},
    #[route("/about")]
    About {},
}

// Shared theme from ui/assets/theme/main.css, inlined so desktop needs no asset directory.
const THEME_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn init_logger() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already installed: {err}");
    }
}

#[cfg(feature = "desktop")]
fn main() {
    init_logger();
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!(
                        "LessWrong census 2018 – v{}",
                        env!("CARGO_PKG_VERSION")
                    ))
                    .with_maximized(true),
            ),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    init_logger();
    LaunchBuilder::server().launch(App);
}

fn nav_results(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::SurveyResults {}, "{label}" })
}
fn nav_about(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::About {}, "{label}" })
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
        document::Style { "{THEME_CSS_INLINE}" }

        // Keyed by language: a switch remounts the routed subtree.
        div { key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

/// Desktop layout: shared navbar above the routed page.
#[component]
fn DesktopNavbar() -> Element {
    rsx! {
        AppNavbar {}
        Outlet::<Route> {}
    }
}
