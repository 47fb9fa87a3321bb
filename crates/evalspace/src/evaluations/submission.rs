use super::domain::{
    EvaluationId, EvaluationRecord, EvaluationResponse, EvaluationSubmission, EvaluationTemplate,
    QuestionId, TemplateId,
};
use super::scoring::{round_to, score_response, CONTRIBUTION_PLACES, RATING_PLACES, SCORE_PLACES};
use chrono::{DateTime, Utc};

/// Input the form should have caught before submitting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("A template must be selected before submitting the evaluation.")]
    TemplateNotSelected,
    #[error("template {0} is not available")]
    UnknownTemplate(TemplateId),
    #[error("All questions must have a rating (missing for {0}).")]
    MissingRating(QuestionId),
    #[error("rating for {0} is not a valid number")]
    InvalidRating(QuestionId),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Question {question_id} does not exist in template {template_id}")]
    UnknownQuestion {
        question_id: QuestionId,
        template_id: TemplateId,
    },
}

/// Caller-level checks: every rating present and finite.
pub fn validate_ratings(submission: &EvaluationSubmission) -> Result<(), ValidationError> {
    for response in &submission.responses {
        match response.rating {
            None => return Err(ValidationError::MissingRating(response.question_id.clone())),
            Some(rating) if !rating.is_finite() => {
                return Err(ValidationError::InvalidRating(response.question_id.clone()))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Scores a validated submission against `template` into a complete record.
///
/// Fails without side effects if any response names a question the template
/// does not define.
pub(crate) fn build_record(
    template: &EvaluationTemplate,
    submission: EvaluationSubmission,
    id: EvaluationId,
    created_at: DateTime<Utc>,
) -> Result<EvaluationRecord, SubmissionError> {
    let EvaluationSubmission {
        subject, responses, ..
    } = submission;

    let mut scored = Vec::with_capacity(responses.len());
    for input in responses {
        let question =
            template
                .question(&input.question_id)
                .ok_or_else(|| SubmissionError::UnknownQuestion {
                    question_id: input.question_id.clone(),
                    template_id: template.id.clone(),
                })?;
        let rating = input
            .rating
            .ok_or_else(|| ValidationError::MissingRating(input.question_id.clone()))?;
        let contribution = score_response(question, rating);

        scored.push(EvaluationResponse {
            question_id: input.question_id,
            rating: round_to(rating, RATING_PLACES),
            comment: input.comment,
            score_contribution: round_to(contribution, CONTRIBUTION_PLACES),
        });
    }

    let total: f64 = scored
        .iter()
        .map(|response| response.score_contribution)
        .sum();

    Ok(EvaluationRecord {
        id,
        template_id: template.id.clone(),
        subject_name: subject.subject_name,
        subject_role: subject.subject_role,
        evaluator_name: subject.evaluator_name,
        evaluation_date: subject.evaluation_date,
        notes: subject.notes,
        responses: scored,
        overall_score: round_to(total, SCORE_PLACES),
        created_at,
    })
}
