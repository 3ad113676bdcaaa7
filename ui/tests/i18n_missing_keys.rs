use std::collections::{BTreeSet, HashSet};

/// Every additional locale must define every message of the fallback
/// (ru-RU) `census-ui.ftl`, and no file may define a message twice.
///
/// To add a locale, create `ui/i18n/<locale>/census-ui.ftl`, copy the ru-RU
/// keys, translate, and register the file in `LOCALES` below.
const RU_RU: &str = include_str!("../i18n/ru-RU/census-ui.ftl");
const EN_US: &str = include_str!("../i18n/en-US/census-ui.ftl");

const LOCALES: &[(&str, &str)] = &[("en-US", EN_US)];

/// Message keys in definition order, duplicates included.
fn keys(src: &str) -> Vec<&str> {
    src.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('.'))
        .filter_map(|line| line.split_once('=').map(|(key, _)| key.trim()))
        .filter(|key| !key.is_empty() && !key.contains(char::is_whitespace))
        .collect()
}

fn duplicates<'a>(keys: &[&'a str]) -> BTreeSet<&'a str> {
    let mut seen = HashSet::new();
    keys.iter().copied().filter(|key| !seen.insert(*key)).collect()
}

#[test]
fn fallback_has_unique_keys() {
    let fallback = keys(RU_RU);
    assert!(!fallback.is_empty(), "ru-RU contains no keys");
    assert!(duplicates(&fallback).is_empty(), "ru-RU: {:?}", duplicates(&fallback));
}

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback: BTreeSet<&str> = keys(RU_RU).into_iter().collect();

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        let own = keys(src);
        let dups = duplicates(&own);
        if !dups.is_empty() {
            failures.push(format!("{locale} defines twice: {dups:?}"));
        }
        let own: BTreeSet<&str> = own.into_iter().collect();
        let missing: Vec<&str> = fallback.difference(&own).copied().collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing: {}", missing.join(", ")));
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
