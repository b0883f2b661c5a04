use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::core::config::AppConfig;
use ui::core::liff::{platform_gate, sign_in, LoginStatus};
use ui::core::store;
use ui::i18n;
use ui::views::{Home, MoodResult};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/result/:session_id")]
    SessionResult { session_id: String },
    #[route("/result")]
    MissingSession {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}

fn nav_demo(label: &str) -> Element {
    rsx!(Link {
        class: "page-home__demo-link",
        to: Route::SessionResult {
            session_id: "demo".to_string()
        },
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    i18n::init();
    register_nav(NavBuilder {
        home: nav_home,
        demo: nav_demo,
    });

    let config = use_hook(|| {
        AppConfig::from_build_env().unwrap_or_else(|err| {
            error!("invalid build configuration: {err}");
            AppConfig::default()
        })
    });
    use_context_provider(|| config.clone());
    use_context_provider(|| store::connect(&config));
    use_context_provider(|| Signal::new("en-US".to_string()));
    let mut login = use_context_provider(|| Signal::new(LoginStatus::Pending));

    let liff_id = config.liff_id.clone();
    use_future(move || {
        let liff_id = liff_id.clone();
        async move {
            let gate = platform_gate();
            let status = sign_in(gate.as_ref(), liff_id.as_deref()).await;
            info!("login settled: {status:?}");
            login.set(status);
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// A web-specific Router around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        main { class: "app-main",
            Outlet::<Route> {}
        }
    }
}

#[component]
fn SessionResult(session_id: String) -> Element {
    rsx! {
        MoodResult { session_id: Some(session_id) }
    }
}

#[component]
fn MissingSession() -> Element {
    rsx! {
        MoodResult { session_id: None }
    }
}
