mod about;
pub use about::About;

mod survey;
pub use survey::SurveyResults;
