//! Framework-independent core: data model, grouping, chart layout.

pub mod chart;
pub mod dataset;
pub mod error;
pub mod format;
pub mod grouping;
pub mod listing;
pub mod reconcile;
pub mod rules;
pub mod scale;

pub use chart::{redraw, ChartConfig, ChartSurface, RenderMode, RenderReport};
pub use dataset::{QuestionDataset, ShowMode, SortMode, SurveyData, SurveyGroup, SURVEY};
pub use error::{DataError, GroupError};
pub use grouping::{group, BarId, GroupedBar, Special};
pub use listing::{visual_for, QuestionVisual};
pub use rules::DisplayRules;
