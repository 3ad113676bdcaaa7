mod block;
pub use block::QuestionBlock;

mod group;
pub use group::{QuestionGroup, SurveyMenu};

mod histogram;
pub use histogram::HistogramChart;

mod listing;
pub use listing::{OtherValues, TextListing};

use std::ops::Deref;

use dioxus::logger::tracing::{error, warn};

use crate::core::dataset::{SurveyData, SURVEY};

/// Handle to the process-wide survey. Compares by identity, so passing it as
/// a prop never triggers a deep comparison.
#[derive(Debug, Clone, Copy)]
pub struct SurveyRef(&'static SurveyData);

impl SurveyRef {
    pub fn new(survey: &'static SurveyData) -> Self {
        Self(survey)
    }
}

impl PartialEq for SurveyRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Deref for SurveyRef {
    type Target = SurveyData;

    fn deref(&self) -> &SurveyData {
        self.0
    }
}

/// The embedded survey, or why it could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyState {
    pub survey: Option<SurveyRef>,
    pub error: Option<String>,
}

impl SurveyState {
    pub fn load() -> Self {
        match SURVEY.as_ref() {
            Ok(survey) => {
                for key in survey.missing_questions() {
                    warn!(question = %key, "question listed in structure has no data; skipped");
                }
                Self {
                    survey: Some(SurveyRef::new(survey)),
                    error: None,
                }
            }
            Err(err) => {
                error!("couldn't load survey data: {err}");
                Self {
                    survey: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}
