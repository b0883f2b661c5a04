//! Every embedded locale formats the meter's argument messages.
//!
//! Runs as one test: the loader is process-global and the language switch
//! would race across test threads.

use ui::i18n;

const ARGUMENT_MESSAGES: &[(&str, &str, &str)] = &[
    ("meter-error", "cause", "network-lost"),
    ("meter-grid-label", "session", "team.retro"),
    ("meter-entry-count", "count", "42"),
    ("meter-unrecognized", "count", "7"),
    ("login-failed", "reason", "LIFF SDK is not loaded"),
];

#[test]
fn every_locale_formats_argument_messages() {
    i18n::init();

    i18n::set_language("en-US").unwrap();
    let english_no_data = i18n::message("meter-no-data", &[]).unwrap();

    for tag in i18n::available_languages() {
        i18n::set_language(&tag).unwrap();
        assert_eq!(i18n::current_language(), tag);

        for (key, arg, value) in ARGUMENT_MESSAGES {
            let text = i18n::message(key, &[(*arg, value.to_string())])
                .unwrap_or_else(|| panic!("{tag} lacks {key}"));
            assert!(
                text.contains(*value),
                "{tag}/{key} dropped ${arg}: {text:?}"
            );
        }

        let no_data = i18n::message("meter-no-data", &[]).unwrap();
        if tag != "en-US" {
            assert_ne!(no_data, english_no_data, "{tag} still shows English");
        }
    }

    i18n::set_language("en-US").unwrap();
}
