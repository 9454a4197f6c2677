use crate::workflows::directory::domain::UserId;
use crate::workflows::evaluation::domain::{
    EvaluationStatus, HrEvaluation, HrStatus, HrTrackStatus, ManagerEvaluation,
    ManagerTrackStatus, QuestionId, ResponseId,
};
use crate::workflows::evaluation::rollup::{hr_rollup, manager_rollup, show_manager_overview};

fn row(question: u64, evaluator: u64, status: EvaluationStatus) -> ManagerEvaluation {
    ManagerEvaluation {
        response: ResponseId(1),
        question: QuestionId(question),
        evaluator: UserId(evaluator),
        scale_value: Some(5),
        text_value: String::new(),
        status,
    }
}

#[test]
fn no_rows_means_not_started() {
    assert_eq!(manager_rollup(&[]), ManagerTrackStatus::NotStarted);
}

#[test]
fn unanimous_submission_rolls_up_to_submitted() {
    let rows = vec![
        row(1, 2, EvaluationStatus::Submitted),
        row(2, 2, EvaluationStatus::Submitted),
        row(1, 5, EvaluationStatus::Submitted),
    ];
    assert_eq!(manager_rollup(&rows), ManagerTrackStatus::Submitted);
}

#[test]
fn any_draft_row_downgrades_the_pool() {
    let rows = vec![
        row(1, 2, EvaluationStatus::Submitted),
        row(2, 5, EvaluationStatus::Draft),
    ];
    assert_eq!(manager_rollup(&rows), ManagerTrackStatus::Draft);
}

#[test]
fn hr_rollup_follows_the_stored_row() {
    assert_eq!(hr_rollup(None), HrTrackStatus::NotStarted);

    let mut hr = HrEvaluation::new(ResponseId(1));
    assert_eq!(hr_rollup(Some(&hr)), HrTrackStatus::Draft);

    hr.status = HrStatus::Completed;
    assert_eq!(hr_rollup(Some(&hr)), HrTrackStatus::Completed);
}

#[test]
fn overview_gate_requires_both_tracks() {
    assert!(show_manager_overview(
        ManagerTrackStatus::Submitted,
        HrTrackStatus::Completed
    ));
    assert!(!show_manager_overview(
        ManagerTrackStatus::Submitted,
        HrTrackStatus::Draft
    ));
    assert!(!show_manager_overview(
        ManagerTrackStatus::Draft,
        HrTrackStatus::Completed
    ));
    assert!(!show_manager_overview(
        ManagerTrackStatus::NotStarted,
        HrTrackStatus::NotStarted
    ));
}
