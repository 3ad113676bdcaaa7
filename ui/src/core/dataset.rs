//! Survey data model and decoding of the embedded data file.
//!
//! The data file is produced upstream (normalization, deduplication and
//! privacy filtering happen there) and is treated as trusted input. Decoding
//! is the only validation step: an unknown `sort` mode is rejected here,
//! everything else is taken as-is.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer};

use super::error::DataError;

const EMBEDDED_SURVEY: &str = include_str!("../../assets/data/survey.json");

/// Decoded survey shipped with the crate. Decoded on first access, never mutated.
pub static SURVEY: Lazy<Result<SurveyData, DataError>> =
    Lazy::new(|| SurveyData::from_json(EMBEDDED_SURVEY));

/// Whole data file: respondent total, section layout, per-question tallies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SurveyData {
    /// Number of participants. Denominator for every percentage and the
    /// upper bound of every chart's horizontal scale.
    pub total: u32,
    pub structure: Vec<SurveyGroup>,
    pub data: HashMap<String, QuestionDataset>,
}

impl SurveyData {
    pub fn from_json(raw: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn question(&self, key: &str) -> Option<&QuestionDataset> {
        self.data.get(key)
    }

    /// Question keys referenced by `structure` but absent from `data`.
    pub fn missing_questions(&self) -> Vec<&str> {
        self.structure
            .iter()
            .flat_map(|group| group.columns.iter())
            .filter(|key| !self.data.contains_key(key.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// A titled menu section listing question keys in display order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SurveyGroup {
    pub title: String,
    pub columns: Vec<String>,
}

/// One question's pre-aggregated results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionDataset {
    pub title: String,
    #[serde(default)]
    pub values: Vec<ValueCount>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub sort: SortMode,
    #[serde(default)]
    pub custom_sort: Option<Vec<String>>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub shortcuts: HashMap<String, String>,
    #[serde(default)]
    pub show: ShowMode,
    #[serde(default)]
    pub other_values: Option<Vec<String>>,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_limit() -> i64 {
    10
}

impl QuestionDataset {
    /// Display text for a raw value label, honouring `shortcuts`.
    pub fn display_label<'a>(&'a self, name: &'a str) -> &'a str {
        self.shortcuts.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Sum of every tally, the "not answered" bucket included.
    pub fn total_count(&self) -> u64 {
        self.values.iter().map(|v| v.count).sum()
    }
}

/// One `(value, count)` row of the frequency table. `value == None` is the
/// "not answered" bucket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueCount {
    #[serde(deserialize_with = "deserialize_label")]
    pub value: Option<String>,
    pub count: u64,
}

/// Integer-typed questions carry numeric values; labels are always compared
/// and displayed as strings.
fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLabel {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(
        Option::<RawLabel>::deserialize(deserializer)?.map(|raw| match raw {
            RawLabel::Text(text) => text,
            RawLabel::Int(n) => n.to_string(),
            RawLabel::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", f as i64),
            RawLabel::Float(f) => f.to_string(),
        }),
    )
}

/// Ordering strategy for a question's bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Descending by count.
    #[default]
    Top,
    /// Ascending by the label's leading integer.
    Numerical,
    /// Descending lexical.
    Lexical,
    /// Ascending by the last integer in the label.
    LastInt,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Top => "top",
            SortMode::Numerical => "numerical",
            SortMode::Lexical => "lexical",
            SortMode::LastInt => "last_int",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which visual a question gets. Unrecognised values are kept so the block
/// can report them instead of failing the whole page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ShowMode {
    #[default]
    Histogram,
    Text,
    Unknown(String),
}

impl From<String> for ShowMode {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "histogram" => ShowMode::Histogram,
            "text" => ShowMode::Text,
            _ => ShowMode::Unknown(raw),
        }
    }
}
