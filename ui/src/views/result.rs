use dioxus::prelude::*;

use crate::meter::MoodMeterView;
use crate::t;

/// Result page for one session. `session_id` is `None` when the route carried
/// no segment at all.
#[component]
pub fn MoodResult(#[props(!optional)] session_id: Option<String>) -> Element {
    let _lang = try_use_context::<Signal<String>>().map(|s| s());
    let title = t!("result-title");

    rsx! {
        document::Title { "{title}" }
        section { class: "page page-result",
            h1 { class: "page-result__title", "{title}" }
            MoodMeterView { session_id }
        }
    }
}
