use super::domain::{EvaluationTemplate, QuestionId, TemplateQuestion};
use serde::{Deserialize, Serialize};

pub(crate) const CONTRIBUTION_PLACES: i32 = 4;
pub(crate) const SCORE_PLACES: i32 = 2;
pub(crate) const RATING_PLACES: i32 = 2;

/// Points a single rating earns for `question`.
///
/// The rating is clamped into `[0, max_rating]`; a question whose maximum
/// rating is zero never contributes.
pub fn score_response(question: &TemplateQuestion, rating: f64) -> f64 {
    if question.max_rating == 0.0 {
        return 0.0;
    }
    let bounded = rating.max(0.0).min(question.max_rating);
    (bounded / question.max_rating) * question.weight
}

/// Rounds half away from zero at a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// `value` written with exactly `places` decimals, rounding ties away from zero.
///
/// `format!("{:.N}")` alone rounds ties to even, which would disagree with
/// [`round_to`].
pub fn format_fixed(value: f64, places: usize) -> String {
    let rounded = round_to(value, places as i32);
    format!("{rounded:.places$}")
}

/// In-progress answer while the form is being filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDraft {
    pub question_id: QuestionId,
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
}

impl EvaluationDraft {
    /// One zero-rated draft per question, in template order.
    pub fn blank(template: &EvaluationTemplate) -> Vec<Self> {
        template
            .questions
            .iter()
            .map(|question| Self {
                question_id: question.id.clone(),
                rating: 0.0,
                comment: String::new(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLine {
    pub question_id: QuestionId,
    pub question_text: String,
    pub rating: f64,
    pub max_rating: f64,
    pub score: f64,
}

/// Live running total shown beside the form before anything is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePreview {
    pub overall_score: f64,
    pub max_score: f64,
    pub breakdown: Vec<PreviewLine>,
}

pub fn preview(template: &EvaluationTemplate, drafts: &[EvaluationDraft]) -> ScorePreview {
    let mut overall_score = 0.0;
    let mut breakdown = Vec::with_capacity(drafts.len());

    for draft in drafts {
        // drafts can outlive a template switch
        let Some(question) = template.question(&draft.question_id) else {
            continue;
        };
        let rating = if draft.rating.is_finite() {
            draft.rating.max(0.0).min(question.max_rating)
        } else {
            0.0
        };
        let score = score_response(question, rating);
        overall_score += score;
        breakdown.push(PreviewLine {
            question_id: question.id.clone(),
            question_text: question.text.clone(),
            rating,
            max_rating: question.max_rating,
            score: round_to(score, SCORE_PLACES),
        });
    }

    ScorePreview {
        overall_score: round_to(overall_score, SCORE_PLACES),
        max_score: template.max_score,
        breakdown,
    }
}
