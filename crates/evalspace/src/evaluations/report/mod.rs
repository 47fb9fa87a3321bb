mod aggregate;
pub mod views;

pub use aggregate::{aggregate, QuestionAggregate, TemplateAggregate};
pub use views::{RecentEvaluationView, ReportView, ResponseLine, ScoreSummary};
