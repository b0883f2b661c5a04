use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "moodmeter-ui.ftl";
const I18N_DIR: &str = "i18n";

/// Message id -> placeholder names (`$cause`, `$count`, ...) used in its value.
fn parse_ftl(content: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut messages = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        let Some((id, value)) = line.split_once('=') else {
            continue;
        };
        let id = id.trim();
        if id.is_empty() || !id.chars().all(valid_key_char) {
            continue;
        }
        messages.insert(id.to_string(), placeholders(value));
    }
    messages
}

/// Message ids defined more than once; Fluent silently keeps the last one.
fn duplicate_ids(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dups = Vec::new();
    for line in content.lines() {
        let Some((id, _)) = line.split_once('=') else {
            continue;
        };
        let id = id.trim();
        if line.starts_with(char::is_whitespace) || id.is_empty() {
            continue;
        }
        if id.chars().all(valid_key_char) && !seen.insert(id.to_string()) {
            dups.push(id.to_string());
        }
    }
    dups
}

fn placeholders(value: &str) -> BTreeSet<String> {
    value
        .split('$')
        .skip(1)
        .map(|rest| {
            rest.chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect::<String>()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Every literal first argument of `t!(...)` under `src_root`.
fn referenced_keys(src_root: &Path) -> HashSet<String> {
    let mut found = HashSet::new();
    let mut stack = vec![src_root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(read_dir) = fs::read_dir(&path) {
                stack.extend(read_dir.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        for chunk in content.split("t!(\"").skip(1) {
            if let Some(end) = chunk.find('"') {
                let key = &chunk[..end];
                if !key.is_empty() && key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
            }
        }
    }

    found
}

fn locale_dirs(i18n_root: &Path) -> Vec<String> {
    let mut dirs: Vec<String> = fs::read_dir(i18n_root)
        .map(|read_dir| {
            read_dir
                .flatten()
                .filter(|entry| entry.path().is_dir())
                .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
                .filter(|name| name.contains('-'))
                .collect()
        })
        .unwrap_or_default();
    dirs.sort();
    dirs
}

#[test]
fn i18n_completeness() {
    let crate_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let i18n_root = crate_root.join(I18N_DIR);

    let fallback_file = i18n_root.join("en-US").join(FTL_FILENAME);
    let fallback_content =
        fs::read_to_string(&fallback_file).expect("Failed to read fallback FTL file");
    let fallback = parse_ftl(&fallback_content);
    assert!(!fallback.is_empty(), "No messages in {fallback_file:?}");

    let mut missing_in_fallback: Vec<_> = referenced_keys(&crate_root.join("src"))
        .into_iter()
        .filter(|key| !fallback.contains_key(key))
        .collect();
    missing_in_fallback.sort();
    assert!(
        missing_in_fallback.is_empty(),
        "Referenced translation keys missing in fallback:\n{}",
        missing_in_fallback.join("\n")
    );

    let mut report = Vec::new();
    for locale in locale_dirs(&i18n_root) {
        let path = i18n_root.join(&locale).join(FTL_FILENAME);
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("Locale {locale} has no {FTL_FILENAME}: {err}"));
        let messages = parse_ftl(&content);
        for dup in duplicate_ids(&content) {
            report.push(format!("{locale}: {dup} defined twice"));
        }

        for (key, args) in &fallback {
            match messages.get(key) {
                None => report.push(format!("{locale}: missing {key}")),
                Some(translated) if translated != args => report.push(format!(
                    "{locale}: {key} uses {translated:?}, fallback uses {args:?}"
                )),
                Some(_) => {}
            }
        }
    }

    assert!(
        report.is_empty(),
        "Locales out of step with en-US:\n  {}",
        report.join("\n  ")
    );
}

#[test]
fn duplicate_scan() {
    let ftl = "# heading\nmeter-loading = a\nmeter-no-data = b\nmeter-loading = c\n";
    assert_eq!(duplicate_ids(ftl), vec!["meter-loading".to_string()]);
}

#[test]
fn placeholder_scan() {
    let args = placeholders(" An error occurred. { $cause } ({ $count })");
    assert_eq!(
        args.into_iter().collect::<Vec<_>>(),
        vec!["cause".to_string(), "count".to_string()]
    );
}
