//! Performance-review evaluation workflow: who may see a survey response,
//! how the pooled manager track and the HR track roll up, and the two writes
//! that move a response through the cycle.

pub mod access;
pub mod domain;
pub mod repository;
pub mod router;
pub mod rollup;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    offered_after_hire, Competency, CompetencyId, EvaluationStatus, HrEvaluation, HrStatus,
    HrTrackStatus, ManagerEvaluation, ManagerTrackStatus, Question, QuestionAudience, QuestionId,
    QuestionKind, QuestionLifecycle, ResponseId, ResponseStatus, Survey, SurveyAnswer,
    SurveyAudience, SurveyId, SurveyResponse, SCALE_MAX,
};
pub use repository::EvaluationRepository;
pub use router::review_router;
pub use rollup::{hr_rollup, manager_rollup, show_manager_overview};
pub use scoring::{
    competency_scores, overall_percentage, show_radar, CompetencyScore, RADAR_MIN_COMPETENCIES,
};
pub use service::{
    EvaluationEntry, HrAction, ResponseOverview, ReviewService, RosterEntry, SurveyStanding,
    WorkflowError,
};
