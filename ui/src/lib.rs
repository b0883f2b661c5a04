//! Shared UI crate for the mood meter. Session tallies, the live store
//! bindings and every view shared by the platform crates live here.

use dioxus::prelude::*;

pub mod core;
pub mod i18n;
pub mod meter;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

/// Global stylesheet with the grid, notice and legend rules.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
