use super::domain::{
    Competency, HrEvaluation, ManagerEvaluation, Question, QuestionId, ResponseId, Survey,
    SurveyAnswer, SurveyId, SurveyResponse,
};
use crate::workflows::directory::domain::{DepartmentId, UserId};
use crate::workflows::directory::repository::RepositoryError;

/// Survey/response store seam. Read methods return empty collections rather
/// than errors when nothing matches; `Unavailable` is reserved for transport
/// failures.
pub trait EvaluationRepository: Send + Sync {
    fn survey(&self, id: SurveyId) -> Result<Option<Survey>, RepositoryError>;
    /// Surveys of one department, newest first.
    fn surveys_for_department(&self, id: DepartmentId) -> Result<Vec<Survey>, RepositoryError>;
    fn questions(&self, ids: &[QuestionId]) -> Result<Vec<Question>, RepositoryError>;
    fn competencies(&self) -> Result<Vec<Competency>, RepositoryError>;

    fn response(&self, id: ResponseId) -> Result<Option<SurveyResponse>, RepositoryError>;
    fn response_for(
        &self,
        survey: SurveyId,
        respondent: UserId,
    ) -> Result<Option<SurveyResponse>, RepositoryError>;
    /// All responses of one respondent, newest first.
    fn responses_for_user(&self, respondent: UserId)
        -> Result<Vec<SurveyResponse>, RepositoryError>;
    fn answers(&self, response: ResponseId) -> Result<Vec<SurveyAnswer>, RepositoryError>;

    /// Evaluator rows pooled across all evaluators of one response.
    fn manager_evaluations(
        &self,
        response: ResponseId,
    ) -> Result<Vec<ManagerEvaluation>, RepositoryError>;
    fn manager_evaluations_by(
        &self,
        response: ResponseId,
        evaluator: UserId,
    ) -> Result<Vec<ManagerEvaluation>, RepositoryError>;
    /// Insert-or-overwrite keyed by (response, question, evaluator).
    fn upsert_manager_evaluation(&self, row: ManagerEvaluation) -> Result<(), RepositoryError>;

    fn hr_evaluation(&self, response: ResponseId)
        -> Result<Option<HrEvaluation>, RepositoryError>;
    /// Insert-or-overwrite the single HR row of a response.
    fn upsert_hr_evaluation(&self, row: HrEvaluation) -> Result<(), RepositoryError>;
}
