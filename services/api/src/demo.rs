use crate::infra::{load_catalog, parse_date, parse_rating};
use chrono::{Local, NaiveDate};
use clap::Args;
use evalspace::config::AppConfig;
use evalspace::error::AppError;
use evalspace::evaluations::{
    EvaluationSubmission, EvaluationTemplate, EvaluationWorkspace, ReportView, ResponseInput,
    SubjectInfo, TemplateCatalog, TemplateId, ValidationError,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Template to evaluate against (defaults to the first catalog entry)
    #[arg(long)]
    pub(crate) template: Option<String>,
    /// Evaluation date for the seeded records (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Skip highlighting the most recent evaluation in the report
    #[arg(long)]
    pub(crate) no_highlight: bool,
    /// Write evaluations.csv and evaluations.json into this directory
    #[arg(long)]
    pub(crate) export_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Template to score against (defaults to the first catalog entry)
    #[arg(long)]
    pub(crate) template: Option<String>,
    /// Name of the person being evaluated
    #[arg(long)]
    pub(crate) subject: String,
    /// Role of the person being evaluated
    #[arg(long, default_value = "")]
    pub(crate) role: String,
    /// Name of the evaluator
    #[arg(long)]
    pub(crate) evaluator: String,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Free-form notes stored with the record
    #[arg(long, default_value = "")]
    pub(crate) notes: String,
    /// Question rating as QUESTION=RATING; repeat for each question
    #[arg(long = "rating", value_parser = parse_rating, required = true)]
    pub(crate) ratings: Vec<ResponseInput>,
}

fn session_from_config() -> Result<EvaluationWorkspace, AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.catalog)?;
    Ok(EvaluationWorkspace::new(Arc::new(catalog)))
}

fn resolve_template<'a>(
    catalog: &'a TemplateCatalog,
    template: Option<&str>,
) -> Result<&'a EvaluationTemplate, AppError> {
    let id = template.map(TemplateId::from);
    catalog
        .resolve(id.as_ref())
        .ok_or_else(|| match id {
            Some(id) => ValidationError::UnknownTemplate(id),
            None => ValidationError::TemplateNotSelected,
        })
        .map_err(AppError::from)
}

pub(crate) fn run_templates() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.catalog)?;

    println!("Evaluation templates");
    for template in catalog.templates() {
        println!(
            "- {} | {} | max score {} | by {}",
            template.id, template.name, template.max_score, template.created_by
        );
        if let Some(description) = &template.description {
            println!("  {description}");
        }
        for question in &template.questions {
            println!(
                "  - [{}] {} (weight {}, rated 0-{})",
                question.id, question.text, question.weight, question.max_rating
            );
        }
    }
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        template,
        subject,
        role,
        evaluator,
        date,
        notes,
        ratings,
    } = args;

    let workspace = session_from_config()?;
    let template_id = resolve_template(workspace.catalog(), template.as_deref())?
        .id
        .clone();

    let record = workspace.submit(EvaluationSubmission {
        template_id: Some(template_id),
        subject: SubjectInfo {
            subject_name: subject,
            subject_role: role,
            evaluator_name: evaluator,
            evaluation_date: date.unwrap_or_else(|| Local::now().date_naive()),
            notes,
        },
        responses: ratings,
    })?;

    let json = serde_json::to_string_pretty(&record)
        .map_err(evalspace::evaluations::ExportError::from)?;
    println!("{json}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        template,
        date,
        no_highlight,
        export_dir,
    } = args;

    let workspace = session_from_config()?;
    let evaluation_date = date.unwrap_or_else(|| Local::now().date_naive());
    let template = resolve_template(workspace.catalog(), template.as_deref())?.clone();

    let mut latest = None;
    for submission in sample_submissions(&template, evaluation_date) {
        let subject = submission.subject.subject_name.clone();
        match workspace.submit(submission) {
            Ok(record) => {
                println!(
                    "Recorded {} for {} ({:.2} / {})",
                    record.id, subject, record.overall_score, template.max_score
                );
                latest = Some(record.id);
            }
            Err(err) => println!("Submission for {subject} rejected: {err}"),
        }
    }

    let highlight = if no_highlight { None } else { latest };
    if let Some(report) = workspace.report(Some(&template.id), highlight.as_ref()) {
        render_report(&report);
    }

    if let Some(dir) = export_dir {
        write_exports(&workspace, &template.id, &dir)?;
        println!("\nExports written to {}", dir.display());
    }

    Ok(())
}

pub(crate) fn write_exports(
    workspace: &EvaluationWorkspace,
    template_id: &TemplateId,
    dir: &Path,
) -> Result<(), AppError> {
    std::fs::create_dir_all(dir)?;
    let csv = workspace.export_csv(Some(template_id))?;
    std::fs::write(dir.join("evaluations.csv"), csv)?;
    let json = workspace.export_json()?;
    std::fs::write(dir.join("evaluations.json"), json)?;
    Ok(())
}

/// Three fixed rating profiles so the demo report has a spread of scores.
pub(crate) fn sample_submissions(
    template: &EvaluationTemplate,
    evaluation_date: NaiveDate,
) -> Vec<EvaluationSubmission> {
    let profiles: [(&str, &str, &str, [f64; 3]); 3] = [
        (
            "Jordan Lee",
            "Account Executive",
            "Consistent quarter with a strong finish.",
            [0.8, 0.6, 1.0],
        ),
        ("Priya Patel", "Support Lead", "", [1.0, 0.8, 0.8]),
        (
            "Marcus Chen",
            "",
            "Ramp-up quarter; revisit goals next cycle.",
            [0.4, 0.6, 0.2],
        ),
    ];

    profiles
        .iter()
        .map(|(name, role, notes, pattern)| EvaluationSubmission {
            template_id: Some(template.id.clone()),
            subject: SubjectInfo {
                subject_name: name.to_string(),
                subject_role: role.to_string(),
                evaluator_name: "Demo Evaluator".to_string(),
                evaluation_date,
                notes: notes.to_string(),
            },
            responses: template
                .questions
                .iter()
                .enumerate()
                .map(|(index, question)| ResponseInput {
                    question_id: question.id.clone(),
                    rating: Some((question.max_rating * pattern[index % pattern.len()]).round()),
                    comment: String::new(),
                })
                .collect(),
        })
        .collect()
}

pub(crate) fn render_report(report: &ReportView) {
    println!("\nEvaluation insights: {}", report.template_name);

    match &report.summary {
        Some(summary) => {
            println!("- Average score: {:.2}%", summary.average_score);
            println!("- Highest score: {:.2}%", summary.highest_score);
            println!("- Lowest score: {:.2}%", summary.lowest_score);
            println!("- Evaluations logged: {}", summary.evaluation_count);
        }
        None => {
            println!("Reports appear once evaluations are saved.");
            return;
        }
    }

    println!("\nQuestion performance");
    for row in &report.question_performance {
        println!(
            "- {}: average rating {:.2}, {:.2} pts",
            row.question_text, row.average_rating, row.average_contribution
        );
    }

    println!("\nRecent evaluations");
    for evaluation in &report.recent_evaluations {
        let marker = if evaluation.highlighted { "*" } else { "-" };
        println!(
            "{marker} {} | {:.2}% | {}",
            evaluation.subject_name,
            evaluation.overall_score,
            evaluation.meta_line()
        );
        for line in &evaluation.responses {
            println!("    {}: {}", line.question_text, line.label());
        }
        if !evaluation.notes.is_empty() {
            println!("    Notes: {}", evaluation.notes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
    }

    #[test]
    fn sample_submissions_score_against_standard_template() {
        let workspace = EvaluationWorkspace::new(Arc::new(TemplateCatalog::standard()));
        let template = workspace.catalog().default_template().clone();

        for submission in sample_submissions(&template, demo_date()) {
            workspace.submit(submission).expect("sample submits");
        }

        let records = workspace.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].subject_name, "Marcus Chen");
        let aggregate = workspace.aggregate(None).expect("aggregate");
        assert!(aggregate.highest_score <= template.max_score);
        assert!(aggregate.lowest_score < aggregate.highest_score);
    }

    #[test]
    fn write_exports_creates_both_files() {
        let workspace = EvaluationWorkspace::new(Arc::new(TemplateCatalog::standard()));
        let template = workspace.catalog().default_template().clone();
        for submission in sample_submissions(&template, demo_date()) {
            workspace.submit(submission).expect("sample submits");
        }
        let dir = tempfile::tempdir().expect("temp dir");

        write_exports(&workspace, &template.id, dir.path()).expect("exports written");

        let csv = std::fs::read_to_string(dir.path().join("evaluations.csv")).expect("csv");
        assert_eq!(csv.lines().count(), 4);
        let json = std::fs::read_to_string(dir.path().join("evaluations.json")).expect("json");
        assert!(json.contains("Priya Patel"));
    }

    #[test]
    fn resolve_template_reports_unknown_ids() {
        let catalog = TemplateCatalog::standard();
        let err = resolve_template(&catalog, Some("retired")).expect_err("unknown template");
        assert!(err.to_string().contains("retired"));
        assert!(resolve_template(&catalog, None).is_ok());
    }
}
