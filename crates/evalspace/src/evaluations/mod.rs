//! Rubric templates, weighted scoring, session storage, and reporting.
//!
//! Scoring, aggregation, and export are pure functions over the domain types;
//! [`EvaluationWorkspace`] owns the session's records and is the single entry
//! point for adding to them.

pub mod catalog;
pub mod domain;
pub mod export;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod submission;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, TemplateCatalog, WeightPolicy};
pub use domain::{
    EvaluationId, EvaluationRecord, EvaluationResponse, EvaluationSubmission, EvaluationTemplate,
    QuestionId, ResponseInput, SubjectInfo, TemplateId, TemplateQuestion,
};
pub use export::{records_to_csv, records_to_json, ExportError};
pub use report::{aggregate, QuestionAggregate, ReportView, TemplateAggregate};
pub use router::evaluation_router;
pub use scoring::{format_fixed, preview, round_to, score_response, EvaluationDraft, ScorePreview};
pub use service::EvaluationWorkspace;
pub use submission::{validate_ratings, SubmissionError, ValidationError};
