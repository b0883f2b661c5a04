//! Browser glue shared by the wasm-only integrations.

use wasm_bindgen::{JsCast, JsValue};

/// Best-effort human message for a thrown JavaScript value.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Whether a global (e.g. an SDK loaded from a script tag) is defined.
pub fn has_global(name: &str) -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str(name)).unwrap_or(false)
}
