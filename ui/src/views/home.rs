use dioxus::prelude::*;

use crate::components::app_navbar::demo_link;
use crate::core::config::AppConfig;
use crate::t;

#[component]
pub fn Home() -> Element {
    // Subscribe to the global language code so text refreshes on switch.
    let _lang = try_use_context::<Signal<String>>().map(|s| s());
    let demo_mode = try_use_context::<AppConfig>()
        .map(|config| config.database.is_none())
        .unwrap_or(true);

    rsx! {
        section { class: "page page-home",
            h1 { {t!("home-title")} }
            p { {t!("home-intro")} }
            p { class: "page-home__hint", {t!("home-hint")} }

            if demo_mode {
                div { class: "page-home__demo",
                    p { {t!("home-demo")} }
                    if let Some(link) = demo_link(&t!("home-demo-link")) {
                        {link}
                    }
                }
            }
        }
    }
}
