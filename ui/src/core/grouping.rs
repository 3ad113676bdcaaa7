//! Turns a question's frequency table into the ordered bar list a chart draws.
//!
//! `group` is pure: identical inputs give identical output, and the counts of
//! the returned bars always add up to the counts of the input rows.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::dataset::{QuestionDataset, SortMode, ValueCount};
use super::error::GroupError;

/// Reconciliation key of the synthetic "other" bar.
pub const TAIL_NAME: &str = "tail";
/// Reconciliation key of the synthetic "not answered" bar.
pub const EMPTY_NAME: &str = "Не указано";

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid regex"));
static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarId {
    /// 0-based position among the real value bars.
    Rank(usize),
    Tail,
    Empty,
}

impl fmt::Display for BarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarId::Rank(rank) => write!(f, "{rank}"),
            BarId::Tail => f.write_str("tail"),
            BarId::Empty => f.write_str("empty"),
        }
    }
}

/// Tag for bars that aggregate several answers instead of showing one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Special {
    Tail,
    Empty,
}

impl Special {
    /// Extra style class carried by bars with this tag.
    pub fn css_class(self) -> &'static str {
        match self {
            Special::Tail => "item__tail",
            Special::Empty => "item__empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedBar {
    pub id: BarId,
    pub name: String,
    pub count: u64,
    pub special: Option<Special>,
}

impl GroupedBar {
    fn value(rank: usize, name: String, count: u64) -> Self {
        Self {
            id: BarId::Rank(rank),
            name,
            count,
            special: None,
        }
    }

    fn tail(count: u64) -> Self {
        Self {
            id: BarId::Tail,
            name: TAIL_NAME.to_string(),
            count,
            special: Some(Special::Tail),
        }
    }

    fn empty(count: u64) -> Self {
        Self {
            id: BarId::Empty,
            name: EMPTY_NAME.to_string(),
            count,
            special: Some(Special::Empty),
        }
    }

    pub fn is_tail(&self) -> bool {
        self.special == Some(Special::Tail)
    }
}

/// Group `dataset` into display bars.
///
/// `limit` overrides `dataset.limit` (it is the raised limit after the user
/// expanded the tail). Values beyond the limit collapse into one tail bar;
/// the "not answered" bar is always last, even when its count is zero.
pub fn group(dataset: &QuestionDataset, limit: Option<i64>) -> Result<Vec<GroupedBar>, GroupError> {
    let (tallies, empty_count) = tally(&dataset.values);
    let limit = effective_limit(limit.unwrap_or(dataset.limit));

    let mut bars: Vec<GroupedBar> = order_labels(dataset, tallies)?
        .into_iter()
        .enumerate()
        .map(|(rank, (name, count))| GroupedBar::value(rank, name, count))
        .collect();

    if bars.len() > limit {
        let tail_count = bars.drain(limit..).map(|bar| bar.count).sum();
        bars.push(GroupedBar::tail(tail_count));
    }

    bars.push(GroupedBar::empty(empty_count));
    Ok(bars)
}

fn effective_limit(limit: i64) -> usize {
    usize::try_from(limit.max(0)).unwrap_or(usize::MAX)
}

/// Split rows into per-label tallies (first-seen order) and the unanswered count.
fn tally(values: &[ValueCount]) -> (Vec<(String, u64)>, u64) {
    let mut tallies: Vec<(String, u64)> = Vec::with_capacity(values.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(values.len());
    let mut empty = 0u64;

    for row in values {
        match row.value.as_deref() {
            None => empty += row.count,
            Some(label) => match index.get(label) {
                Some(&slot) => tallies[slot].1 += row.count,
                None => {
                    index.insert(label, tallies.len());
                    tallies.push((label.to_string(), row.count));
                }
            },
        }
    }

    (tallies, empty)
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    /// Position in `custom_sort`; always ahead of every fallback rank.
    Custom(usize),
    Fallback(FallbackKey),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum FallbackKey {
    Count(Reverse<u64>),
    Int(i64),
    Lexical(Reverse<String>),
}

fn order_labels(
    dataset: &QuestionDataset,
    tallies: Vec<(String, u64)>,
) -> Result<Vec<(String, u64)>, GroupError> {
    let custom = dataset.custom_sort.as_deref().unwrap_or_default();

    let mut ranked = tallies
        .into_iter()
        .map(|(label, count)| {
            let rank = match custom.iter().position(|c| *c == label) {
                Some(pos) => Rank::Custom(pos),
                None => Rank::Fallback(fallback_key(dataset.sort, &label, count)?),
            };
            Ok((rank, (label, count)))
        })
        .collect::<Result<Vec<_>, GroupError>>()?;

    // Stable: ties keep source order.
    ranked.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(ranked.into_iter().map(|(_, entry)| entry).collect())
}

fn fallback_key(sort: SortMode, label: &str, count: u64) -> Result<FallbackKey, GroupError> {
    let missing = || GroupError::MissingInteger {
        label: label.to_string(),
        sort,
    };

    Ok(match sort {
        SortMode::Top => FallbackKey::Count(Reverse(count)),
        SortMode::Lexical => FallbackKey::Lexical(Reverse(label.to_string())),
        SortMode::Numerical => FallbackKey::Int(first_int(label).ok_or_else(missing)?),
        SortMode::LastInt => FallbackKey::Int(last_int(label).ok_or_else(missing)?),
    })
}

/// Leading signed integer of `label`, or else its first run of digits.
pub fn first_int(label: &str) -> Option<i64> {
    if let Some(caps) = LEADING_INT.captures(label) {
        return Some(parse_saturating(&caps[1]));
    }
    DIGIT_RUN.find(label).map(|m| parse_saturating(m.as_str()))
}

/// Last run of digits in `label`.
pub fn last_int(label: &str) -> Option<i64> {
    DIGIT_RUN
        .find_iter(label)
        .last()
        .map(|m| parse_saturating(m.as_str()))
}

fn parse_saturating(digits: &str) -> i64 {
    digits.parse().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}
