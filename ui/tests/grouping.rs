use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;
use ui::core::chart::percent_label;
use ui::core::{
    group, redraw, ChartConfig, ChartSurface, DisplayRules, GroupedBar, QuestionDataset,
    ShowMode, Special, SURVEY,
};

fn dataset(value: serde_json::Value) -> QuestionDataset {
    serde_json::from_value(value).unwrap()
}

fn value_names(bars: &[GroupedBar]) -> Vec<&str> {
    bars.iter()
        .filter(|bar| bar.special.is_none())
        .map(|bar| bar.name.as_str())
        .collect()
}

fn languages() -> QuestionDataset {
    dataset(json!({
        "title": "Языки программирования",
        "multiple": true,
        "values": [
            { "value": "Python", "count": 41 },
            { "value": "C++", "count": 18 },
            { "value": "JavaScript", "count": 25 },
            { "value": null, "count": 9 },
            { "value": "Rust", "count": 7 },
            { "value": "Haskell", "count": 3 },
            { "value": "Go", "count": 5 },
            { "value": "Java", "count": 12 }
        ]
    }))
}

#[test]
fn counts_are_conserved_for_every_limit() {
    let ds = languages();
    for limit in -2..10 {
        let bars = group(&ds, Some(limit)).unwrap();
        let grouped: u64 = bars.iter().map(|bar| bar.count).sum();
        assert_eq!(grouped, ds.total_count(), "limit {limit}");
    }
}

#[test]
fn bar_count_is_capped_by_limit() {
    let ds = languages();
    let distinct = 7usize;
    for limit in 0..10i64 {
        let bars = group(&ds, Some(limit)).unwrap();
        let cap = distinct.min(limit as usize) + 2;
        assert!(bars.len() <= cap, "limit {limit}: {} bars", bars.len());

        let tails = bars.iter().filter(|bar| bar.is_tail()).count();
        assert_eq!(tails, usize::from(distinct > limit as usize), "limit {limit}");
        assert_eq!(bars.last().and_then(|bar| bar.special), Some(Special::Empty));
    }
}

#[test]
fn top_sort_is_non_increasing() {
    let bars = group(&languages(), Some(100)).unwrap();
    let counts: Vec<u64> = bars
        .iter()
        .filter(|bar| bar.special.is_none())
        .map(|bar| bar.count)
        .collect();
    assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]), "{counts:?}");
}

#[test]
fn numerical_sort_is_non_decreasing() {
    let ds = dataset(json!({
        "title": "Возраст",
        "sort": "numerical",
        "limit": 50,
        "values": [
            { "value": 31, "count": 4 },
            { "value": 19, "count": 2 },
            { "value": "45+", "count": 1 },
            { "value": 27, "count": 8 },
            { "value": null, "count": 3 },
            { "value": 22, "count": 6 }
        ]
    }));
    let bars = group(&ds, None).unwrap();
    let ages: Vec<i64> = value_names(&bars)
        .iter()
        .map(|name| ui::core::grouping::first_int(name).unwrap())
        .collect();
    assert_eq!(ages, vec![19, 22, 27, 31, 45]);
}

#[test]
fn custom_sort_takes_precedence() {
    let ds = dataset(json!({
        "title": "q",
        "sort": "top",
        "custom_sort": ["b", "a"],
        "values": [
            { "value": "a", "count": 1 },
            { "value": "b", "count": 2 },
            { "value": "c", "count": 3 }
        ]
    }));
    let bars = group(&ds, None).unwrap();
    assert_eq!(value_names(&bars), vec!["b", "a", "c"]);
}

#[test]
fn grouping_is_idempotent() {
    let ds = languages();
    assert_eq!(group(&ds, Some(3)).unwrap(), group(&ds, Some(3)).unwrap());
}

#[test]
fn percentage_label_suppression() {
    let config = ChartConfig::default();
    assert_eq!(percent_label(5, 100, 20.0, false, &config), "");
    assert_eq!(percent_label(37, 100, 177.6, false, &config), "37%");
}

#[test]
fn collapse_scenario() {
    let ds = dataset(json!({
        "title": "q",
        "limit": 1,
        "sort": "top",
        "values": [
            { "value": "x", "count": 3 },
            { "value": "y", "count": 7 },
            { "value": null, "count": 2 }
        ]
    }));
    let bars = group(&ds, None).unwrap();
    let summary: Vec<(&str, u64, Option<Special>)> = bars
        .iter()
        .map(|bar| (bar.name.as_str(), bar.count, bar.special))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("y", 7, None),
            ("tail", 3, Some(Special::Tail)),
            ("Не указано", 2, Some(Special::Empty)),
        ]
    );
}

/// Drives a surface the way the histogram component does: the tail handler
/// raises a per-question limit, then the next pass redraws with it.
fn expand_once(question: &str, ds: &QuestionDataset) -> Option<i64> {
    let rules = DisplayRules::default();
    let limit = Rc::new(Cell::new(None::<i64>));
    let mut surface = ChartSurface::new(ChartConfig::default());

    let handler = {
        let limit = limit.clone();
        let question = question.to_string();
        let base = ds.limit;
        move || limit.set(Some(rules.expanded_limit(&question, limit.get(), base)))
    };
    redraw(&mut surface, ds, limit.get(), 112, handler).unwrap();
    assert!(surface.item("tail").unwrap().activate());
    limit.get()
}

#[test]
fn tail_expansion_raises_limit_by_category_step() {
    let mut ds = languages();
    ds.limit = 5;
    assert_eq!(expand_once("languages", &ds), Some(15));
    assert_eq!(expand_once("hobby", &ds), Some(35));
}

#[test]
fn expanded_limit_shows_more_bars() {
    let mut ds = languages();
    ds.limit = 2;
    let mut surface = ChartSurface::new(ChartConfig::default());
    redraw(&mut surface, &ds, None, 112, || {}).unwrap();
    assert_eq!(surface.items().len(), 4);

    let report = redraw(&mut surface, &ds, Some(12), 112, || {}).unwrap();
    assert_eq!(surface.items().len(), 8);
    assert_eq!(report.removed, vec!["tail"]);
    assert!(surface.item("tail").is_none());
}

#[test]
fn embedded_histograms_all_group() {
    let survey = SURVEY.as_ref().unwrap();
    for (key, ds) in &survey.data {
        if ds.show == ShowMode::Histogram {
            let bars = group(ds, None).unwrap_or_else(|err| panic!("{key}: {err}"));
            if !ds.multiple {
                let grouped: u64 = bars.iter().map(|bar| bar.count).sum();
                assert_eq!(grouped, u64::from(survey.total), "{key}");
            }
        }
    }
}
