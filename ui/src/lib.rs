//! Shared UI crate for the census results viewer. Data model, grouping, chart
//! layout and every view live here; the platform crates only launch it.

use dioxus::prelude::*;

pub mod core;
pub mod i18n;
pub mod survey;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

/// Shared theme, linked by the web launcher and inlined by desktop.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
