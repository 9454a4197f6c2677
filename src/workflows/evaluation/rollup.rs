//! Status rollups for the two evaluation tracks.
//!
//! Rollups are recomputed on every read and never persisted.

use super::domain::{
    EvaluationStatus, HrEvaluation, HrStatus, HrTrackStatus, ManagerEvaluation, ManagerTrackStatus,
};

/// Reduce the pooled evaluator rows of one response to a single status.
///
/// `Submitted` must be unanimous across every stored (question, evaluator)
/// row; any draft row downgrades the whole rollup.
pub fn manager_rollup(rows: &[ManagerEvaluation]) -> ManagerTrackStatus {
    if rows.is_empty() {
        return ManagerTrackStatus::NotStarted;
    }

    if rows
        .iter()
        .all(|row| row.status == EvaluationStatus::Submitted)
    {
        ManagerTrackStatus::Submitted
    } else {
        ManagerTrackStatus::Draft
    }
}

/// Status of the HR track: directly the stored row's status if one exists.
pub fn hr_rollup(row: Option<&HrEvaluation>) -> HrTrackStatus {
    match row.map(|hr| hr.status) {
        None => HrTrackStatus::NotStarted,
        Some(HrStatus::Draft) => HrTrackStatus::Draft,
        Some(HrStatus::Completed) => HrTrackStatus::Completed,
    }
}

/// The single gate revealing the combined manager + HR evaluation to the
/// respondent. Intentionally conjunctive: a submitted manager score with an
/// incomplete HR comment must not be shown, and vice versa.
pub fn show_manager_overview(manager: ManagerTrackStatus, hr: HrTrackStatus) -> bool {
    manager == ManagerTrackStatus::Submitted && hr == HrTrackStatus::Completed
}
