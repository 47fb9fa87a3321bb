use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::catalog::TemplateCatalog;
use super::domain::{
    EvaluationId, EvaluationRecord, EvaluationSubmission, EvaluationTemplate, TemplateId,
};
use super::export::{records_to_csv, records_to_json, ExportError};
use super::report::{aggregate, ReportView, TemplateAggregate};
use super::scoring::{preview, EvaluationDraft, ScorePreview};
use super::store::SessionStore;
use super::submission::{build_record, validate_ratings, SubmissionError, ValidationError};

/// Session state: the template catalog plus every record submitted so far.
///
/// Share it by reference or `Arc`; [`EvaluationWorkspace::submit`] is the
/// only way to add records and every read returns a snapshot.
pub struct EvaluationWorkspace {
    catalog: Arc<TemplateCatalog>,
    store: SessionStore,
    sequence: AtomicU64,
}

impl EvaluationWorkspace {
    pub fn new(catalog: Arc<TemplateCatalog>) -> Self {
        Self {
            catalog,
            store: SessionStore::default(),
            sequence: AtomicU64::new(1),
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn template(&self, id: &TemplateId) -> Option<&EvaluationTemplate> {
        self.catalog.get(id)
    }

    /// Score a submission and store it at the front of the session.
    pub fn submit(
        &self,
        submission: EvaluationSubmission,
    ) -> Result<EvaluationRecord, SubmissionError> {
        self.submit_at(submission, Utc::now())
    }

    pub fn submit_at(
        &self,
        submission: EvaluationSubmission,
        now: DateTime<Utc>,
    ) -> Result<EvaluationRecord, SubmissionError> {
        let template_id = submission
            .template_id
            .clone()
            .ok_or(ValidationError::TemplateNotSelected)?;
        let template = self
            .catalog
            .get(&template_id)
            .ok_or_else(|| ValidationError::UnknownTemplate(template_id.clone()))?;
        validate_ratings(&submission)?;

        let id = self.next_evaluation_id(now);
        let record = build_record(template, submission, id, now)?;

        info!(
            evaluation_id = %record.id,
            template_id = %record.template_id,
            overall_score = record.overall_score,
            responses = record.responses.len(),
            "evaluation recorded"
        );
        self.store.prepend(record.clone());
        Ok(record)
    }

    fn next_evaluation_id(&self, now: DateTime<Utc>) -> EvaluationId {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        EvaluationId(format!("evaluation-{}-{seq:04}", now.timestamp_millis()))
    }

    /// All records, newest first.
    pub fn records(&self) -> Vec<EvaluationRecord> {
        self.store.snapshot()
    }

    pub fn record(&self, id: &EvaluationId) -> Option<EvaluationRecord> {
        self.store.find(id)
    }

    pub fn record_count(&self) -> usize {
        self.store.len()
    }

    pub fn preview(
        &self,
        template_id: &TemplateId,
        drafts: &[EvaluationDraft],
    ) -> Result<ScorePreview, ValidationError> {
        let template = self
            .catalog
            .get(template_id)
            .ok_or_else(|| ValidationError::UnknownTemplate(template_id.clone()))?;
        Ok(preview(template, drafts))
    }

    pub fn aggregate(&self, template_id: Option<&TemplateId>) -> Option<TemplateAggregate> {
        let template = self.catalog.resolve(template_id)?;
        let records = self.store.snapshot();
        debug!(template_id = %template.id, records = records.len(), "aggregating evaluations");
        Some(aggregate(template, &records))
    }

    pub fn report(
        &self,
        template_id: Option<&TemplateId>,
        highlight: Option<&EvaluationId>,
    ) -> Option<ReportView> {
        let template = self.catalog.resolve(template_id)?;
        let records = self.store.snapshot();
        Some(ReportView::build(template, &records, highlight))
    }

    /// CSV of every stored record using `template_id`'s question columns.
    pub fn export_csv(&self, template_id: Option<&TemplateId>) -> Result<String, ExportError> {
        let template = match template_id {
            Some(id) => self
                .catalog
                .get(id)
                .ok_or_else(|| ExportError::UnknownTemplate(id.clone()))?,
            None => self.catalog.default_template(),
        };
        records_to_csv(&self.store.snapshot(), template)
    }

    pub fn export_json(&self) -> Result<String, ExportError> {
        records_to_json(&self.store.snapshot())
    }
}
