use super::domain::{EvaluationRecord, EvaluationTemplate, TemplateId};
use super::scoring::format_fixed;

const FIXED_HEADERS: [&str; 7] = [
    "EvaluationId",
    "TemplateId",
    "SubjectName",
    "SubjectRole",
    "EvaluatorName",
    "EvaluationDate",
    "OverallScore",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("template {0} is not available for export")]
    UnknownTemplate(TemplateId),
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row per record, in input order, with a rating column per template question.
///
/// Every field is quoted. Records with no response for a question leave that
/// column empty.
pub fn records_to_csv(
    records: &[EvaluationRecord],
    template: &EvaluationTemplate,
) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let question_headers = template
        .questions
        .iter()
        .map(|question| format!("Q:{}", question.id));
    let headers: Vec<String> = FIXED_HEADERS
        .iter()
        .map(|header| header.to_string())
        .chain(question_headers)
        .collect();
    writer.write_record(&headers)?;

    for record in records {
        let mut row = vec![
            record.id.to_string(),
            record.template_id.to_string(),
            record.subject_name.clone(),
            record.subject_role.clone(),
            record.evaluator_name.clone(),
            record.evaluation_date.to_string(),
            format_fixed(record.overall_score, 2),
        ];
        row.extend(template.questions.iter().map(|question| {
            record
                .response(&question.id)
                .map(|response| format_fixed(response.rating, 1))
                .unwrap_or_default()
        }));
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Csv(err.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Pretty-printed JSON array of the records, suitable for backups.
pub fn records_to_json(records: &[EvaluationRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}
