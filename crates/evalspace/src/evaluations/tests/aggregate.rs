use super::common::*;
use crate::evaluations::{aggregate, EvaluationId, ReportView, TemplateId};

#[test]
fn empty_input_yields_zeroed_aggregate() {
    let template = two_question_template();

    let result = aggregate(&template, &[]);

    assert_eq!(result.evaluation_count, 0);
    assert_eq!(result.average_score, 0.0);
    assert_eq!(result.highest_score, 0.0);
    assert_eq!(result.lowest_score, 0.0);
    assert_eq!(result.by_question.len(), 2);
    assert!(result
        .by_question
        .iter()
        .all(|row| row.average_rating == 0.0 && row.average_contribution == 0.0));
}

#[test]
fn summarizes_overall_scores() {
    let template = two_question_template();
    let records = vec![
        record_with_score("a", 80.0),
        record_with_score("b", 90.0),
        record_with_score("c", 70.0),
    ];

    let result = aggregate(&template, &records);

    assert_close(result.average_score, 80.0);
    assert_eq!(result.highest_score, 90.0);
    assert_eq!(result.lowest_score, 70.0);
    assert_eq!(result.evaluation_count, 3);
}

#[test]
fn per_question_averages_only_count_matching_responses() {
    let template = two_question_template();
    let mut first = record_with_score("a", 32.0);
    first.responses = vec![response("q1", 4.0, 24.0), response("q2", 2.0, 8.0)];
    let mut second = record_with_score("b", 18.0);
    second.responses = vec![response("q1", 3.0, 18.0)];

    let result = aggregate(&template, &[first, second]);

    let q1 = &result.by_question[0];
    assert_eq!(q1.question_id.0, "q1");
    assert_close(q1.average_rating, 3.5);
    assert_close(q1.average_contribution, 21.0);

    let q2 = &result.by_question[1];
    assert_close(q2.average_rating, 2.0);
    assert_close(q2.average_contribution, 8.0);
}

#[test]
fn question_without_responses_averages_to_zero() {
    let template = two_question_template();
    let mut only_q1 = record_with_score("a", 30.0);
    only_q1.responses = vec![response("q1", 5.0, 30.0)];

    let result = aggregate(&template, &[only_q1]);

    assert_eq!(result.by_question[1].average_rating, 0.0);
    assert_eq!(result.by_question[1].average_contribution, 0.0);
}

#[test]
fn records_for_other_templates_are_ignored() {
    let template = two_question_template();
    let mut foreign = record_with_score("x", 99.0);
    foreign.template_id = TemplateId::from("template-001");
    let records = vec![foreign, record_with_score("a", 40.0)];

    let result = aggregate(&template, &records);

    assert_eq!(result.evaluation_count, 1);
    assert_eq!(result.highest_score, 40.0);
}

#[test]
fn question_rows_follow_template_order() {
    let template = two_question_template();
    let mut record = record_with_score("a", 32.0);
    record.responses = vec![response("q2", 2.0, 8.0), response("q1", 4.0, 24.0)];

    let result = aggregate(&template, &[record.clone()]);
    let ids: Vec<&str> = result
        .by_question
        .iter()
        .map(|row| row.question_id.0.as_str())
        .collect();

    assert_eq!(ids, ["q1", "q2"]);
    assert_eq!(result, aggregate(&template, &[record]));
}

#[test]
fn report_view_marks_highlighted_record() {
    let template = two_question_template();
    let mut newest = record_with_score("b", 32.0);
    newest.responses = vec![response("q1", 4.0, 24.0), response("orphan", 1.0, 1.0)];
    newest.notes = "Strong quarter".to_string();
    let records = vec![newest, record_with_score("a", 10.0)];

    let view = ReportView::build(&template, &records, Some(&EvaluationId::from("b")));

    let summary = view.summary.as_ref().expect("summary present");
    assert_eq!(summary.evaluation_count, 2);
    assert_eq!(view.question_performance.len(), 2);
    assert_eq!(view.recent_evaluations[0].evaluation_id.0, "b");
    assert!(view.recent_evaluations[0].highlighted);
    assert!(!view.recent_evaluations[1].highlighted);
    assert_eq!(view.recent_evaluations[0].responses.len(), 1);
    assert_eq!(
        view.recent_evaluations[0].responses[0].label(),
        "4.0 / 5 -> 24.00 pts"
    );
    assert_eq!(
        view.highlighted().map(|entry| entry.notes.as_str()),
        Some("Strong quarter")
    );
}

#[test]
fn response_label_rounds_ties_away_from_zero() {
    let template = two_question_template();
    let mut record = record_with_score("tie", 1.13);
    record.responses = vec![response("q2", 2.25, 1.125)];

    let view = ReportView::build(&template, &[record], None);

    assert_eq!(
        view.recent_evaluations[0].responses[0].label(),
        "2.3 / 5 -> 1.13 pts"
    );
}

#[test]
fn report_view_omits_summary_without_evaluations() {
    let template = two_question_template();

    let view = ReportView::build(&template, &[], None);

    assert!(view.summary.is_none());
    assert!(view.question_performance.is_empty());
    assert!(view.recent_evaluations.is_empty());
    assert!(view.highlighted().is_none());
}
