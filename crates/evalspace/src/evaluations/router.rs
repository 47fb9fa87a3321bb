use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::domain::{EvaluationId, EvaluationSubmission, TemplateId};
use super::scoring::EvaluationDraft;
use super::service::EvaluationWorkspace;
use crate::error::AppError;

/// Router builder exposing the workspace over JSON.
pub fn evaluation_router(workspace: Arc<EvaluationWorkspace>) -> Router {
    Router::new()
        .route("/api/v1/templates", get(list_templates_handler))
        .route("/api/v1/templates/:template_id", get(template_handler))
        .route("/api/v1/evaluations", get(list_evaluations_handler).post(submit_handler))
        .route("/api/v1/evaluations/preview", post(preview_handler))
        .route("/api/v1/evaluations/:evaluation_id", get(evaluation_handler))
        .route("/api/v1/reports", get(report_handler))
        .route("/api/v1/exports/evaluations.csv", get(export_csv_handler))
        .route("/api/v1/exports/evaluations.json", get(export_json_handler))
        .with_state(workspace)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    #[serde(default)]
    pub(crate) template_id: Option<String>,
    #[serde(default)]
    pub(crate) highlight: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PreviewRequest {
    pub(crate) template_id: TemplateId,
    #[serde(default)]
    pub(crate) drafts: Option<Vec<EvaluationDraft>>,
}

pub(crate) async fn list_templates_handler(
    State(workspace): State<Arc<EvaluationWorkspace>>,
) -> Response {
    (StatusCode::OK, Json(workspace.catalog().templates())).into_response()
}

pub(crate) async fn template_handler(
    State(workspace): State<Arc<EvaluationWorkspace>>,
    Path(template_id): Path<String>,
) -> Result<Response, AppError> {
    let id = TemplateId(template_id);
    let template = workspace
        .template(&id)
        .ok_or_else(|| AppError::NotFound(format!("template {id} not found")))?;
    Ok((StatusCode::OK, Json(template)).into_response())
}

pub(crate) async fn preview_handler(
    State(workspace): State<Arc<EvaluationWorkspace>>,
    Json(request): Json<PreviewRequest>,
) -> Result<Response, AppError> {
    let drafts = match (request.drafts, workspace.template(&request.template_id)) {
        (Some(drafts), _) => drafts,
        (None, Some(template)) => EvaluationDraft::blank(template),
        (None, None) => Vec::new(),
    };

    let preview = workspace.preview(&request.template_id, &drafts)?;
    Ok((StatusCode::OK, Json(preview)).into_response())
}

pub(crate) async fn submit_handler(
    State(workspace): State<Arc<EvaluationWorkspace>>,
    Json(submission): Json<EvaluationSubmission>,
) -> Result<Response, AppError> {
    let record = workspace.submit(submission)?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

pub(crate) async fn list_evaluations_handler(
    State(workspace): State<Arc<EvaluationWorkspace>>,
) -> Response {
    (StatusCode::OK, Json(workspace.records())).into_response()
}

pub(crate) async fn evaluation_handler(
    State(workspace): State<Arc<EvaluationWorkspace>>,
    Path(evaluation_id): Path<String>,
) -> Result<Response, AppError> {
    let id = EvaluationId(evaluation_id);
    let record = workspace
        .record(&id)
        .ok_or_else(|| AppError::NotFound(format!("evaluation {id} not found")))?;
    Ok((StatusCode::OK, Json(record)).into_response())
}

pub(crate) async fn report_handler(
    State(workspace): State<Arc<EvaluationWorkspace>>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
    let template_id = query.template_id.map(TemplateId);
    let highlight = query.highlight.map(EvaluationId);

    let report = workspace
        .report(template_id.as_ref(), highlight.as_ref())
        .ok_or_else(|| match &template_id {
            Some(id) => AppError::NotFound(format!("template {id} not found")),
            None => AppError::NotFound("template not found".to_string()),
        })?;
    Ok((StatusCode::OK, Json(report)).into_response())
}

pub(crate) async fn export_csv_handler(
    State(workspace): State<Arc<EvaluationWorkspace>>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
    let template_id = query.template_id.map(TemplateId);
    let csv = workspace.export_csv(template_id.as_ref())?;
    Ok(download(csv, "text/csv; charset=utf-8", "evaluations.csv"))
}

pub(crate) async fn export_json_handler(
    State(workspace): State<Arc<EvaluationWorkspace>>,
) -> Result<Response, AppError> {
    let json = workspace.export_json()?;
    Ok(download(json, "application/json", "evaluations.json"))
}

fn download(body: String, content_type: &'static str, file_name: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}
