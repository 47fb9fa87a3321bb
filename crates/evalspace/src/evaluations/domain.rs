use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for rubric templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

/// Identifier wrapper for questions inside a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

/// Identifier wrapper for stored evaluation records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationId(pub String);

macro_rules! display_id {
    ($($name:ident),*) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

display_id!(TemplateId, QuestionId, EvaluationId);

/// A single weighted question of a rubric.
///
/// `weight` is the number of points the question contributes when rated at
/// `max_rating`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateQuestion {
    pub id: QuestionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
    pub weight: f64,
    pub max_rating: f64,
}

/// Read-only rubric definition. Question order is significant for reports and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub max_score: f64,
    pub created_by: String,
    pub questions: Vec<TemplateQuestion>,
}

impl EvaluationTemplate {
    pub fn question(&self, id: &QuestionId) -> Option<&TemplateQuestion> {
        self.questions.iter().find(|question| &question.id == id)
    }

    pub fn total_weight(&self) -> f64 {
        self.questions.iter().map(|question| question.weight).sum()
    }
}

/// Scored answer to one template question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub question_id: QuestionId,
    pub rating: f64,
    pub comment: String,
    pub score_contribution: f64,
}

/// Finalized, immutable submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub template_id: TemplateId,
    pub subject_name: String,
    pub subject_role: String,
    pub evaluator_name: String,
    pub evaluation_date: NaiveDate,
    pub notes: String,
    pub responses: Vec<EvaluationResponse>,
    pub overall_score: f64,
    pub created_at: DateTime<Utc>,
}

impl EvaluationRecord {
    pub fn response(&self, question_id: &QuestionId) -> Option<&EvaluationResponse> {
        self.responses
            .iter()
            .find(|response| &response.question_id == question_id)
    }
}

/// Who was evaluated, by whom, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectInfo {
    pub subject_name: String,
    #[serde(default)]
    pub subject_role: String,
    pub evaluator_name: String,
    pub evaluation_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

/// Raw user input for one question. A missing rating is rejected during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseInput {
    pub question_id: QuestionId,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub comment: String,
}

impl ResponseInput {
    pub fn rated(question_id: impl Into<String>, rating: f64) -> Self {
        Self {
            question_id: QuestionId(question_id.into()),
            rating: Some(rating),
            comment: String::new(),
        }
    }
}

/// Everything the evaluation form hands to the workspace on submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSubmission {
    #[serde(default)]
    pub template_id: Option<TemplateId>,
    #[serde(flatten)]
    pub subject: SubjectInfo,
    pub responses: Vec<ResponseInput>,
}
