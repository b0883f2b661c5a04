use crate::core::liff::LoginStatus;
use crate::i18n;
use crate::t;
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Links supplied by the platform crate, so `ui` never needs to know its
/// `Route` enum.
///
/// Each closure receives the localized label and returns a `Link` that
/// already contains it. Register once before the router renders:
///
/// ```ignore
/// register_nav(NavBuilder {
///     home: |label| rsx!( Link { class: "navbar__link", to: Route::Home {}, "{label}" } ),
///     demo: |label| rsx!( Link { to: Route::SessionResult { session_id: "demo".into() }, "{label}" } ),
/// });
/// ```
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    /// Link to the seeded demo session.
    pub demo: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

/// Demo session link from the registered builder, if any.
pub fn demo_link(label: &str) -> Option<Element> {
    NAV_BUILDER.get().map(|b| (b.demo)(label))
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    i18n::init();

    let mut current_lang = use_signal(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    // Reading the global code subscribes this component to language switches.
    let lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();
    let login = try_use_context::<Signal<LoginStatus>>()
        .map(|s| s())
        .unwrap_or_default();

    debug!("navbar render lang={lang_marker} login={login:?}");

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        if i18n::set_language(&val).is_ok() {
            current_lang.set(val.clone());
            if let Some(mut code) = lang_code_ctx {
                code.set(val);
            }
        }
    };

    let home_link = NAV_BUILDER.get().map(|b| (b.home)(&t!("nav-home")));
    let tagline = t!("tagline");
    let banner = login_banner(&login);

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }

        header {
            id: "navbar",
            class: "navbar",
            div { style: "display:none", "{lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Mood Meter" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                nav { class: "navbar__links",
                    if let Some(link) = home_link {
                        {link}
                    }
                    {children}
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
                            { langs().iter().map(|code| {
                                let c = code.clone();
                                let label = i18n::language_label(code).to_string();
                                rsx! {
                                    option { key: "{c}", value: "{c}", "{label}" }
                                }
                            })}
                        }
                    }
                }
            }
        }

        if let Some((class, text)) = banner {
            div { class: "navbar__banner {class}", role: "status", "{text}" }
        }
    }
}

/// Banner shown under the navbar while LINE login is not settled.
fn login_banner(status: &LoginStatus) -> Option<(&'static str, String)> {
    match status {
        LoginStatus::Ready => None,
        LoginStatus::Pending => Some(("navbar__banner--pending", t!("login-pending"))),
        LoginStatus::Redirecting => Some(("navbar__banner--pending", t!("login-redirecting"))),
        LoginStatus::Failed(reason) => Some((
            "navbar__banner--error",
            t!("login-failed", reason = reason.as_str()),
        )),
    }
}
