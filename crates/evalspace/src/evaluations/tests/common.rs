use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::evaluations::domain::{
    EvaluationId, EvaluationRecord, EvaluationResponse, EvaluationSubmission, EvaluationTemplate,
    QuestionId, ResponseInput, SubjectInfo, TemplateId, TemplateQuestion,
};
use crate::evaluations::{EvaluationWorkspace, TemplateCatalog, WeightPolicy};

pub(super) fn question(id: &str, weight: f64, max_rating: f64) -> TemplateQuestion {
    TemplateQuestion {
        id: QuestionId::from(id),
        text: format!("Question {id}"),
        guidance: None,
        weight,
        max_rating,
    }
}

/// Two questions rated out of 5, weighted 30 and 20.
pub(super) fn two_question_template() -> EvaluationTemplate {
    EvaluationTemplate {
        id: TemplateId::from("tpl-two"),
        name: "Two question rubric".to_string(),
        description: None,
        max_score: 50.0,
        created_by: "Test Suite".to_string(),
        questions: vec![question("q1", 30.0, 5.0), question("q2", 20.0, 5.0)],
    }
}

pub(super) fn catalog() -> Arc<TemplateCatalog> {
    let catalog = TemplateCatalog::new(
        vec![two_question_template(), TemplateCatalog::standard().templates()[0].clone()],
        WeightPolicy::Strict,
    )
    .expect("fixture catalog is valid");
    Arc::new(catalog)
}

pub(super) fn workspace() -> EvaluationWorkspace {
    EvaluationWorkspace::new(catalog())
}

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 31, 16, 45, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn subject(name: &str) -> SubjectInfo {
    SubjectInfo {
        subject_name: name.to_string(),
        subject_role: "Engineer".to_string(),
        evaluator_name: "Dana Reviewer".to_string(),
        evaluation_date: NaiveDate::from_ymd_opt(2025, 3, 31).expect("valid date"),
        notes: String::new(),
    }
}

pub(super) fn submission(name: &str, ratings: &[(&str, f64)]) -> EvaluationSubmission {
    EvaluationSubmission {
        template_id: Some(TemplateId::from("tpl-two")),
        subject: subject(name),
        responses: ratings
            .iter()
            .map(|(id, rating)| ResponseInput::rated(*id, *rating))
            .collect(),
    }
}

pub(super) fn record_with_score(id: &str, overall_score: f64) -> EvaluationRecord {
    EvaluationRecord {
        id: EvaluationId::from(id),
        template_id: TemplateId::from("tpl-two"),
        subject_name: format!("Subject {id}"),
        subject_role: String::new(),
        evaluator_name: "Dana Reviewer".to_string(),
        evaluation_date: NaiveDate::from_ymd_opt(2025, 3, 31).expect("valid date"),
        notes: String::new(),
        responses: Vec::new(),
        overall_score,
        created_at: fixed_now(),
    }
}

pub(super) fn response(question_id: &str, rating: f64, score_contribution: f64) -> EvaluationResponse {
    EvaluationResponse {
        question_id: QuestionId::from(question_id),
        rating,
        comment: String::new(),
        score_contribution,
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn read_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_str(&read_body(response).await).expect("json payload")
}
