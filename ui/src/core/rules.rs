//! Per-question-category display rules.
//!
//! A few questions get special treatment (a larger tail expansion step, a
//! two-line title). The exceptions live in lookup tables here so adding a
//! category never touches the renderer.

use once_cell::sync::Lazy;
use regex::Regex;

static BRACKETED_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*) \[(.*)\]$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRules {
    /// How much one tail click raises the limit.
    pub default_expand_step: i64,
    /// Question keys with their own expansion step.
    pub expand_steps: Vec<(String, i64)>,
    /// Key prefixes whose `"category [item]"` titles render on two lines.
    pub dual_title_prefixes: Vec<String>,
}

impl Default for DisplayRules {
    fn default() -> Self {
        Self {
            default_expand_step: 10,
            expand_steps: vec![("hobby".into(), 30)],
            dual_title_prefixes: vec!["psy_".into(), "slang_".into(), "online_".into()],
        }
    }
}

impl DisplayRules {
    pub fn expand_step(&self, key: &str) -> i64 {
        self.expand_steps
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, step)| *step)
            .unwrap_or(self.default_expand_step)
    }

    /// Limit to use after one more tail expansion of question `key`.
    pub fn expanded_limit(&self, key: &str, current: Option<i64>, base: i64) -> i64 {
        current.unwrap_or(base).saturating_add(self.expand_step(key))
    }

    pub fn wants_dual_title(&self, key: &str) -> bool {
        self.dual_title_prefixes
            .iter()
            .any(|prefix| key.starts_with(prefix.as_str()))
    }

    /// Split `title` into category and item when `key` belongs to a dual-title
    /// category and the title has the bracket suffix.
    pub fn split_dual_title<'a>(&self, key: &str, title: &'a str) -> Option<DualTitle<'a>> {
        if !self.wants_dual_title(key) {
            return None;
        }
        let caps = BRACKETED_TITLE.captures(title)?;
        Some(DualTitle {
            category: caps.get(1)?.as_str(),
            item: caps.get(2)?.as_str(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualTitle<'a> {
    pub category: &'a str,
    pub item: &'a str,
}
