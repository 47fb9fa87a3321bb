use super::domain::{EvaluationTemplate, QuestionId, TemplateId, TemplateQuestion};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::warn;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// How template loading treats weights that do not add up to `max_score`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeightPolicy {
    /// Log a warning and accept the template.
    #[default]
    Permissive,
    /// Reject the template.
    Strict,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read template catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid template catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("template catalog is empty")]
    Empty,
    #[error("template {0} is defined more than once")]
    DuplicateTemplate(TemplateId),
    #[error("question {question_id} appears more than once in template {template_id}")]
    DuplicateQuestion {
        template_id: TemplateId,
        question_id: QuestionId,
    },
    #[error("template {template_id} has invalid max score {max_score}")]
    InvalidMaxScore {
        template_id: TemplateId,
        max_score: f64,
    },
    #[error("question {question_id} in template {template_id} has invalid {field} {value}")]
    InvalidQuestion {
        template_id: TemplateId,
        question_id: QuestionId,
        field: &'static str,
        value: f64,
    },
    #[error("template {template_id} question weights sum to {total_weight}, expected {max_score}")]
    WeightMismatch {
        template_id: TemplateId,
        total_weight: f64,
        max_score: f64,
    },
}

/// Ordered, read-only set of templates supplied at startup.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<EvaluationTemplate>,
}

impl TemplateCatalog {
    pub fn new(
        templates: Vec<EvaluationTemplate>,
        policy: WeightPolicy,
    ) -> Result<Self, CatalogError> {
        if templates.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen_templates = HashSet::new();
        for template in &templates {
            if !seen_templates.insert(&template.id) {
                return Err(CatalogError::DuplicateTemplate(template.id.clone()));
            }
            check_template(template, policy)?;
        }

        Ok(Self { templates })
    }

    /// Built-in catalog containing the quarterly performance rubric.
    pub fn standard() -> Self {
        Self {
            templates: vec![quarterly_review_template()],
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P, policy: WeightPolicy) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, policy)
    }

    pub fn from_reader<R: Read>(reader: R, policy: WeightPolicy) -> Result<Self, CatalogError> {
        let templates: Vec<EvaluationTemplate> = serde_json::from_reader(reader)?;
        Self::new(templates, policy)
    }

    pub fn templates(&self) -> &[EvaluationTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &TemplateId) -> Option<&EvaluationTemplate> {
        self.templates.iter().find(|template| &template.id == id)
    }

    /// Template used by reports and exports when none is named.
    pub fn default_template(&self) -> &EvaluationTemplate {
        &self.templates[0]
    }

    /// Named template, or the default one when `id` is `None`.
    pub fn resolve(&self, id: Option<&TemplateId>) -> Option<&EvaluationTemplate> {
        match id {
            Some(id) => self.get(id),
            None => Some(self.default_template()),
        }
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn check_template(template: &EvaluationTemplate, policy: WeightPolicy) -> Result<(), CatalogError> {
    if !non_negative(template.max_score) {
        return Err(CatalogError::InvalidMaxScore {
            template_id: template.id.clone(),
            max_score: template.max_score,
        });
    }

    let mut seen_questions = HashSet::new();
    for question in &template.questions {
        if !seen_questions.insert(&question.id) {
            return Err(CatalogError::DuplicateQuestion {
                template_id: template.id.clone(),
                question_id: question.id.clone(),
            });
        }
        for (field, value) in [("weight", question.weight), ("maxRating", question.max_rating)] {
            if !non_negative(value) {
                return Err(CatalogError::InvalidQuestion {
                    template_id: template.id.clone(),
                    question_id: question.id.clone(),
                    field,
                    value,
                });
            }
        }
    }

    let total_weight = template.total_weight();
    if (total_weight - template.max_score).abs() > WEIGHT_TOLERANCE {
        match policy {
            WeightPolicy::Strict => {
                return Err(CatalogError::WeightMismatch {
                    template_id: template.id.clone(),
                    total_weight,
                    max_score: template.max_score,
                })
            }
            WeightPolicy::Permissive => warn!(
                template_id = %template.id,
                total_weight,
                max_score = template.max_score,
                "question weights do not add up to the template max score"
            ),
        }
    }

    Ok(())
}

fn quarterly_review_template() -> EvaluationTemplate {
    let question = |id: &str, text: &str, guidance: &str, weight: f64| TemplateQuestion {
        id: QuestionId::from(id),
        text: text.to_string(),
        guidance: Some(guidance.to_string()),
        weight,
        max_rating: 5.0,
    };

    EvaluationTemplate {
        id: TemplateId::from("template-001"),
        name: "Quarterly Performance Review".to_string(),
        description: Some(
            "Standard rubric for evaluating quarterly objectives and competencies.".to_string(),
        ),
        max_score: 100.0,
        created_by: "HR Team".to_string(),
        questions: vec![
            question(
                "q-1",
                "Delivers on quarterly goals and key results.",
                "Consider goal completion rates and measurable outcomes.",
                30.0,
            ),
            question(
                "q-2",
                "Demonstrates collaboration and teamwork.",
                "Evaluate communication, supportiveness, and cross-team work.",
                20.0,
            ),
            question(
                "q-3",
                "Shows initiative and innovation in problem solving.",
                "Look for proactive improvements and creative solutions.",
                25.0,
            ),
            question(
                "q-4",
                "Maintains quality standards and attention to detail.",
                "Assess accuracy, thoroughness, and adherence to process.",
                15.0,
            ),
            question(
                "q-5",
                "Supports professional development and learning.",
                "Consider mentorship, self-learning, and knowledge sharing.",
                10.0,
            ),
        ],
    }
}
