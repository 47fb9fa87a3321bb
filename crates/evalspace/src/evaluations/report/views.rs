use super::super::domain::{
    EvaluationId, EvaluationRecord, EvaluationTemplate, QuestionId, TemplateId,
};
use super::super::scoring::format_fixed;
use super::aggregate::{aggregate, QuestionAggregate, TemplateAggregate};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub evaluation_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseLine {
    pub question_id: QuestionId,
    pub question_text: String,
    pub rating: f64,
    pub max_rating: f64,
    pub score_contribution: f64,
}

impl ResponseLine {
    pub fn label(&self) -> String {
        format!(
            "{} / {} -> {} pts",
            format_fixed(self.rating, 1),
            self.max_rating,
            format_fixed(self.score_contribution, 2)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEvaluationView {
    pub evaluation_id: EvaluationId,
    pub subject_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject_role: String,
    pub evaluator_name: String,
    pub evaluation_date: NaiveDate,
    pub overall_score: f64,
    pub responses: Vec<ResponseLine>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub highlighted: bool,
}

impl RecentEvaluationView {
    fn from_record(
        template: &EvaluationTemplate,
        record: &EvaluationRecord,
        highlight: Option<&EvaluationId>,
    ) -> Self {
        let responses = record
            .responses
            .iter()
            .filter_map(|response| {
                let question = template.question(&response.question_id)?;
                Some(ResponseLine {
                    question_id: question.id.clone(),
                    question_text: question.text.clone(),
                    rating: response.rating,
                    max_rating: question.max_rating,
                    score_contribution: response.score_contribution,
                })
            })
            .collect();

        Self {
            evaluation_id: record.id.clone(),
            subject_name: record.subject_name.clone(),
            subject_role: record.subject_role.clone(),
            evaluator_name: record.evaluator_name.clone(),
            evaluation_date: record.evaluation_date,
            overall_score: record.overall_score,
            responses,
            notes: record.notes.clone(),
            highlighted: highlight == Some(&record.id),
        }
    }

    pub fn meta_line(&self) -> String {
        let role = if self.subject_role.is_empty() {
            String::new()
        } else {
            format!("{} · ", self.subject_role)
        };
        format!(
            "{role}Evaluated by {} on {}",
            self.evaluator_name, self.evaluation_date
        )
    }
}

/// Everything the reporting page shows for one template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub template_id: TemplateId,
    pub template_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ScoreSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub question_performance: Vec<QuestionAggregate>,
    pub recent_evaluations: Vec<RecentEvaluationView>,
}

impl ReportView {
    /// Summary and question rows are omitted until at least one evaluation exists.
    pub fn build(
        template: &EvaluationTemplate,
        records: &[EvaluationRecord],
        highlight: Option<&EvaluationId>,
    ) -> Self {
        let TemplateAggregate {
            template_id,
            template_name,
            average_score,
            highest_score,
            lowest_score,
            evaluation_count,
            by_question,
        } = aggregate(template, records);

        let (summary, question_performance) = if evaluation_count > 0 {
            let summary = ScoreSummary {
                average_score,
                highest_score,
                lowest_score,
                evaluation_count,
            };
            (Some(summary), by_question)
        } else {
            (None, Vec::new())
        };

        let recent_evaluations = records
            .iter()
            .filter(|record| record.template_id == template.id)
            .map(|record| RecentEvaluationView::from_record(template, record, highlight))
            .collect();

        Self {
            template_id,
            template_name,
            summary,
            question_performance,
            recent_evaluations,
        }
    }

    pub fn highlighted(&self) -> Option<&RecentEvaluationView> {
        self.recent_evaluations
            .iter()
            .find(|evaluation| evaluation.highlighted)
    }
}
