//! Which visual a question gets, and the literal listings for free-text answers.

use super::dataset::{QuestionDataset, ShowMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionVisual {
    Histogram,
    TextListing,
    /// Unrecognised `show`; the block draws no visual.
    Nothing,
}

pub fn visual_for(show: &ShowMode) -> QuestionVisual {
    match show {
        ShowMode::Histogram => QuestionVisual::Histogram,
        ShowMode::Text => QuestionVisual::TextListing,
        ShowMode::Unknown(_) => QuestionVisual::Nothing,
    }
}

/// Every value of a `show = text` question, in source order, one per line.
/// Unanswered rows print as empty lines.
pub fn text_lines(dataset: &QuestionDataset) -> Vec<&str> {
    dataset
        .values
        .iter()
        .map(|row| row.value.as_deref().unwrap_or(""))
        .collect()
}

/// Free-text answers kept aside from the histogram, if the question has any.
pub fn other_lines(dataset: &QuestionDataset) -> Option<&[String]> {
    dataset.other_values.as_deref()
}
