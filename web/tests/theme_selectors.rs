#![cfg(test)]
/*!
Theme selector lint for the web build.

The shared components emit these class names; the unified theme at
`ui/assets/theme/main.css` must keep a rule for each of them. A renamed or
dropped selector only shows up at runtime, so check for it here.

When a component's markup changes, update REQUIRED_SELECTORS with it.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const NAVBAR_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/navbar.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    ":root",
    "body {",
    ".page {",
    ".app-main",
    // Meter notices
    ".mood-meter__notice",
    ".mood-meter__message",
    ".mood-meter__message--error",
    // Grid
    ".mood-grid {",
    ".mood-grid__cell {",
    ".mood-grid__cell--red",
    ".mood-grid__cell--yellow",
    ".mood-grid__cell--blue",
    ".mood-grid__cell--green",
    ".mood-grid__cell--unmapped",
    "repeat(10, 1fr)",
    // Legend and counts
    ".mood-meter__count",
    ".mood-meter__legend",
    ".mood-meter__legend-swatch",
    ".mood-meter__footnote",
    ".visually-hidden",
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<_> = REQUIRED_SELECTORS
        .iter()
        .filter(|sel| !THEME_CSS.contains(**sel))
        .collect();

    assert!(
        missing.is_empty(),
        "Missing {} required CSS selectors/tokens in unified theme:\n{:?}",
        missing.len(),
        missing
    );
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 1_500,
        "Theme appears unexpectedly small ({non_ws_len} non-whitespace chars)"
    );
}

#[test]
fn navbar_styles_cover_login_banner() {
    for sel in [
        ".navbar__banner",
        ".navbar__banner--pending",
        ".navbar__banner--error",
        ".navbar__locale",
    ] {
        assert!(NAVBAR_CSS.contains(sel), "navbar.css lacks `{sel}`");
    }
}
