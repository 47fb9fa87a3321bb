use super::super::domain::{EvaluationRecord, EvaluationTemplate, QuestionId, TemplateId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAggregate {
    pub question_id: QuestionId,
    pub question_text: String,
    pub average_rating: f64,
    pub average_contribution: f64,
}

/// Summary statistics over one template's evaluations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateAggregate {
    pub template_id: TemplateId,
    pub template_name: String,
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub evaluation_count: usize,
    pub by_question: Vec<QuestionAggregate>,
}

/// Aggregates the records that reference `template`; others are ignored.
///
/// An empty selection yields zeros throughout, with one row per question
/// still present. Question rows follow template order.
pub fn aggregate(template: &EvaluationTemplate, records: &[EvaluationRecord]) -> TemplateAggregate {
    let matching: Vec<&EvaluationRecord> = records
        .iter()
        .filter(|record| record.template_id == template.id)
        .collect();

    let by_question = template
        .questions
        .iter()
        .map(|question| {
            let (count, rating_total, contribution_total) = matching
                .iter()
                .flat_map(|record| record.responses.iter())
                .filter(|response| response.question_id == question.id)
                .fold((0usize, 0.0, 0.0), |(count, ratings, contributions), response| {
                    (
                        count + 1,
                        ratings + response.rating,
                        contributions + response.score_contribution,
                    )
                });

            QuestionAggregate {
                question_id: question.id.clone(),
                question_text: question.text.clone(),
                average_rating: mean(rating_total, count),
                average_contribution: mean(contribution_total, count),
            }
        })
        .collect();

    let (average_score, highest_score, lowest_score) = if matching.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let scores = matching.iter().map(|record| record.overall_score);
        let total: f64 = scores.clone().sum();
        let highest = scores.clone().fold(f64::NEG_INFINITY, f64::max);
        let lowest = scores.fold(f64::INFINITY, f64::min);
        (mean(total, matching.len()), highest, lowest)
    };

    TemplateAggregate {
        template_id: template.id.clone(),
        template_name: template.name.clone(),
        average_score,
        highest_score,
        lowest_score,
        evaluation_count: matching.len(),
        by_question,
    }
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
