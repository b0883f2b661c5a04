//! Localized strings for the meter, the navbar and the login banner.
//!
//! Bundles live in `i18n/<lang>/moodmeter-ui.ftl` and are embedded at build
//! time. `en-US` is the fallback; `ja-JP` and `th-TH` cover the LINE markets
//! the app ships to. Call sites use [`t!`](crate::t), which checks keys and
//! arguments at compile time against the fallback bundle.
//!
//! Messages with arguments:
//!
//! | key                  | argument   |
//! |----------------------|------------|
//! | `meter-error`        | `$cause`   |
//! | `meter-grid-label`   | `$session` |
//! | `meter-entry-count`  | `$count`   |
//! | `meter-unrecognized` | `$count`   |
//! | `login-failed`       | `$reason`  |

use std::collections::HashMap;
use std::sync::Once;

use dioxus::logger::tracing::{debug, warn};
use fluent::FluentValue;
use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// `t!("meter-no-data")`, `t!("meter-error", cause = err.as_str())`.
///
/// Shorthand for `fl!` against [`LOADER`].
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Loader domain; also the bundle filename and the `domain` in `i18n.toml`.
pub const DOMAIN: &str = "moodmeter-ui";
pub const FALLBACK_LANGUAGE: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Bundles;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK_LANGUAGE
        .parse()
        .expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Load the bundles matching the browser (or OS) language list. Idempotent.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match i18n_embed::select(&*LOADER, &Bundles, &requested) {
            Ok(selected) => debug!("loaded locales {selected:?}"),
            Err(err) => warn!("failed selecting languages ({err}); continuing with fallback"),
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        debug!("ignoring language tag {tag:?}");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Bundles, &[lang]).map(|_| ())
}

/// Embedded language tags, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs: Vec<String> = Bundles::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect();
    langs.sort();
    langs.dedup();
    langs
}

pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Name of a language in that language, for the locale picker.
pub fn language_label(tag: &str) -> &str {
    match tag {
        "en-US" => "English",
        "ja-JP" => "日本語",
        "th-TH" => "ไทย",
        other => other,
    }
}

/// Runtime lookup for keys only known at run time. `None` when the active
/// bundles lack the key.
pub fn message(key: &str, args: &[(&str, String)]) -> Option<String> {
    if !LOADER.has(key) {
        return None;
    }
    let args: HashMap<&str, FluentValue<'_>> = args
        .iter()
        .map(|(name, value)| (*name, FluentValue::from(value.as_str())))
        .collect();
    Some(LOADER.get_args_concrete(key, args))
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
