use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::access;
use super::domain::{
    offered_after_hire, EvaluationStatus, HrEvaluation, HrStatus, HrTrackStatus, ManagerEvaluation,
    ManagerTrackStatus, QuestionId, ResponseId, ResponseStatus, Survey, SurveyId, SCALE_MAX,
};
use super::repository::EvaluationRepository;
use super::rollup::{hr_rollup, manager_rollup, show_manager_overview};
use super::scoring::{competency_scores, overall_percentage, show_radar, CompetencyScore};
use crate::workflows::directory::domain::{Role, User, UserId};
use crate::workflows::directory::repository::{DirectoryRepository, RepositoryError};

/// Service composing the access rules, rollups, and scoring over the two
/// repository seams.
pub struct ReviewService<D, E> {
    directory: Arc<D>,
    store: Arc<E>,
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("viewer is not allowed to perform this action")]
    Forbidden,
    #[error("record not found")]
    NotFound,
    #[error("submission incomplete: scale input missing for {missing:?}")]
    ValidationFailed { missing: Vec<String> },
    #[error("scale value {value} exceeds the 0..={SCALE_MAX} range")]
    ScaleOutOfRange { question: QuestionId, value: u8 },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One survey of a respondent with both track statuses and the overview gate.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyStanding {
    pub survey: SurveyId,
    pub survey_name: String,
    pub year: Option<u16>,
    pub response: Option<ResponseId>,
    pub response_status: Option<ResponseStatus>,
    pub manager_status: ManagerTrackStatus,
    pub hr_status: HrTrackStatus,
    pub show_overview: bool,
}

/// One roster line: an employee plus their standing on the newest survey
/// offered to them.
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub employee: UserId,
    pub display_name: String,
    pub role: Role,
    pub latest: Option<SurveyStanding>,
}

/// Everything a response detail page needs in one bundle. The evaluation
/// fields are `None` when the respondent themselves is looking and the
/// overview gate has not opened yet.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseOverview {
    pub response: ResponseId,
    pub respondent: UserId,
    pub respondent_name: String,
    pub survey_name: String,
    pub response_status: ResponseStatus,
    pub manager_status: ManagerTrackStatus,
    pub hr_status: HrTrackStatus,
    pub show_overview: bool,
    pub self_series: Vec<CompetencyScore>,
    pub show_radar: bool,
    pub manager_series: Option<Vec<CompetencyScore>>,
    pub manager_overall: Option<f64>,
    pub hr_comment: Option<String>,
}

/// One question's input from an evaluator's save.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationEntry {
    pub question: QuestionId,
    pub scale_value: Option<u8>,
    #[serde(default)]
    pub text_value: String,
}

/// What the HR author asked for when saving their comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrAction {
    Draft,
    Completed,
}

impl<D, E> ReviewService<D, E>
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    pub fn new(directory: Arc<D>, store: Arc<E>) -> Self {
        Self { directory, store }
    }

    fn user(&self, id: UserId) -> Result<User, WorkflowError> {
        self.directory.user(id)?.ok_or(WorkflowError::NotFound)
    }

    fn survey(&self, id: SurveyId) -> Result<Survey, WorkflowError> {
        self.store.survey(id)?.ok_or(WorkflowError::NotFound)
    }

    /// Statuses and gate for one (respondent, survey) pair.
    fn standing(&self, respondent: UserId, survey: &Survey) -> Result<SurveyStanding, WorkflowError> {
        let response = self.store.response_for(survey.id, respondent)?;

        let (response_id, response_status, manager_status, hr_status) = match &response {
            Some(response) => {
                let rows = self.store.manager_evaluations(response.id)?;
                let hr = self.store.hr_evaluation(response.id)?;
                (
                    Some(response.id),
                    Some(response.status),
                    manager_rollup(&rows),
                    hr_rollup(hr.as_ref()),
                )
            }
            None => (
                None,
                None,
                ManagerTrackStatus::NotStarted,
                HrTrackStatus::NotStarted,
            ),
        };

        Ok(SurveyStanding {
            survey: survey.id,
            survey_name: survey.name.clone(),
            year: survey.year,
            response: response_id,
            response_status,
            manager_status,
            hr_status,
            show_overview: show_manager_overview(manager_status, hr_status),
        })
    }

    /// Surveys currently offered to `user`: their department's surveys for
    /// their role, created on or after their hire date.
    fn offered_surveys(&self, user: &User) -> Result<Vec<Survey>, WorkflowError> {
        let Some(department) = user.department else {
            return Ok(Vec::new());
        };

        let surveys = self
            .store
            .surveys_for_department(department)?
            .into_iter()
            .filter(|survey| survey.audience.matches(user.role))
            .filter(|survey| offered_after_hire(survey, user.hired_on))
            .collect();
        Ok(surveys)
    }

    /// The viewer's own survey list with rollups and the overview gate.
    pub fn home_overview(&self, viewer: UserId) -> Result<Vec<SurveyStanding>, WorkflowError> {
        let viewer = self.user(viewer)?;
        self.offered_surveys(&viewer)?
            .iter()
            .map(|survey| self.standing(viewer.id, survey))
            .collect()
    }

    /// The employees `viewer` oversees, each with their standing on the
    /// newest survey offered to them. Managers get their department, team
    /// leaders their members, HR and admins everyone reviewable.
    pub fn roster(&self, viewer: UserId) -> Result<Vec<RosterEntry>, WorkflowError> {
        let viewer = self.user(viewer)?;

        let employees: Vec<User> = if viewer.is_privileged() {
            self.directory
                .users()?
                .into_iter()
                .filter(|user| user.is_active && user.role.is_reviewable())
                .collect()
        } else {
            match viewer.role {
                Role::Manager => match viewer.department {
                    Some(department) => self
                        .directory
                        .users_in_department(department)?
                        .into_iter()
                        .filter(|user| user.is_active && user.role.is_reviewable())
                        .collect(),
                    None => Vec::new(),
                },
                Role::TeamLeader => self.directory.team_members(viewer.id)?,
                _ => return Err(WorkflowError::Forbidden),
            }
        };

        let mut roster = Vec::with_capacity(employees.len());
        for employee in employees {
            // The newest survey currently offered to the employee, whether or
            // not they have responded yet; an unanswered current cycle must
            // read as pending, not as a finished earlier one.
            let latest = match self.offered_surveys(&employee)?.first() {
                Some(survey) => Some(self.standing(employee.id, survey)?),
                None => None,
            };
            roster.push(RosterEntry {
                employee: employee.id,
                display_name: employee.display_name,
                role: employee.role,
                latest,
            });
        }
        Ok(roster)
    }

    /// Survey list of one employee, as seen by a supervisor.
    pub fn employee_surveys(
        &self,
        viewer: UserId,
        employee: UserId,
    ) -> Result<Vec<SurveyStanding>, WorkflowError> {
        let viewer = self.user(viewer)?;
        let employee = self.user(employee)?;

        if !access::can_view_employee_surveys(&viewer, &employee) {
            return Err(WorkflowError::Forbidden);
        }

        self.offered_surveys(&employee)?
            .iter()
            .map(|survey| self.standing(employee.id, survey))
            .collect()
    }

    /// Full response detail: self-assessment series always, the pooled
    /// evaluation side only once the gate opens (or to anyone other than the
    /// respondent with view access).
    pub fn response_overview(
        &self,
        viewer: UserId,
        response: ResponseId,
    ) -> Result<ResponseOverview, WorkflowError> {
        let viewer = self.user(viewer)?;
        let response = self
            .store
            .response(response)?
            .ok_or(WorkflowError::NotFound)?;
        let respondent = self.user(response.respondent)?;

        if !access::can_view_response(&viewer, &respondent) {
            return Err(WorkflowError::Forbidden);
        }

        let survey = self.survey(response.survey)?;
        let questions = self.store.questions(&survey.questions)?;
        let competencies = self.store.competencies()?;

        let answers = self.store.answers(response.id)?;
        let self_scores: Vec<(QuestionId, Option<u8>)> = answers
            .iter()
            .map(|answer| (answer.question, answer.scale_value))
            .collect();

        let manager_rows = self.store.manager_evaluations(response.id)?;
        let hr = self.store.hr_evaluation(response.id)?;

        let manager_status = manager_rollup(&manager_rows);
        let hr_status = hr_rollup(hr.as_ref());
        let show_overview = show_manager_overview(manager_status, hr_status);

        let self_series = competency_scores(&competencies, &questions, &self_scores);

        // The respondent sees the evaluation side only through the gate;
        // every other authorized viewer sees work in progress.
        let reveal = viewer.id != respondent.id || show_overview;

        let (manager_series, manager_overall) = if reveal {
            let pooled: Vec<(QuestionId, Option<u8>)> = manager_rows
                .iter()
                .map(|row| (row.question, row.scale_value))
                .collect();
            let series = competency_scores(&competencies, &questions, &pooled);
            let overall = overall_percentage(manager_rows.iter().map(|row| row.scale_value));
            (Some(series), Some(overall))
        } else {
            (None, None)
        };

        let hr_comment = match (&hr, reveal) {
            (Some(row), true) if row.status == HrStatus::Completed => Some(row.comment.clone()),
            _ => None,
        };

        Ok(ResponseOverview {
            response: response.id,
            respondent: respondent.id,
            respondent_name: respondent.display_name,
            survey_name: survey.name,
            response_status: response.status,
            manager_status,
            hr_status,
            show_overview,
            show_radar: show_radar(self_series.len()),
            self_series,
            manager_series,
            manager_overall,
            hr_comment,
        })
    }

    /// The evaluator's own saved rows, for prefilling the scoring form.
    pub fn evaluator_entries(
        &self,
        evaluator: UserId,
        response: ResponseId,
    ) -> Result<Vec<ManagerEvaluation>, WorkflowError> {
        let evaluator = self.user(evaluator)?;
        let response = self
            .store
            .response(response)?
            .ok_or(WorkflowError::NotFound)?;
        let respondent = self.user(response.respondent)?;

        if !access::can_score_responses(&evaluator)
            || !access::can_view_response(&evaluator, &respondent)
        {
            return Err(WorkflowError::Forbidden);
        }

        Ok(self.store.manager_evaluations_by(response.id, evaluator.id)?)
    }

    /// Upsert an evaluator's scoring rows for one response.
    ///
    /// Submitted saves are all-or-nothing: every respondent answer carrying a
    /// scale value must receive a scale input, otherwise nothing is written
    /// and the offending question texts come back in the error. Entries for
    /// questions the respondent never answered are ignored; entries with
    /// neither a scale nor text are skipped, leaving prior rows untouched.
    pub fn save_manager_evaluation(
        &self,
        evaluator: UserId,
        response: ResponseId,
        entries: Vec<EvaluationEntry>,
        save_type: EvaluationStatus,
    ) -> Result<ManagerTrackStatus, WorkflowError> {
        let evaluator = self.user(evaluator)?;
        let response = self
            .store
            .response(response)?
            .ok_or(WorkflowError::NotFound)?;
        let respondent = self.user(response.respondent)?;

        if !access::can_score_responses(&evaluator)
            || !access::can_view_response(&evaluator, &respondent)
        {
            return Err(WorkflowError::Forbidden);
        }

        let answers = self.store.answers(response.id)?;

        // The scoring form renders only the respondent's answered questions;
        // inputs for any other question are dropped, not stored. A stored row
        // for a question outside the answer sheet could never be resubmitted
        // and would pin the rollup at draft forever.
        let entries: Vec<EvaluationEntry> = entries
            .into_iter()
            .filter(|entry| {
                answers
                    .iter()
                    .any(|answer| answer.question == entry.question)
            })
            .collect();

        for entry in &entries {
            if let Some(value) = entry.scale_value {
                if value > SCALE_MAX {
                    return Err(WorkflowError::ScaleOutOfRange {
                        question: entry.question,
                        value,
                    });
                }
            }
        }

        if save_type == EvaluationStatus::Submitted {
            let missing: Vec<QuestionId> = answers
                .iter()
                .filter(|answer| answer.scale_value.is_some())
                .map(|answer| answer.question)
                .filter(|question| {
                    !entries
                        .iter()
                        .any(|entry| entry.question == *question && entry.scale_value.is_some())
                })
                .collect();

            if !missing.is_empty() {
                let missing = self
                    .store
                    .questions(&missing)?
                    .into_iter()
                    .map(|question| question.text)
                    .collect();
                return Err(WorkflowError::ValidationFailed { missing });
            }
        }

        let mut written = 0usize;
        for entry in entries {
            if entry.scale_value.is_none() && entry.text_value.trim().is_empty() {
                continue;
            }
            self.store.upsert_manager_evaluation(ManagerEvaluation {
                response: response.id,
                question: entry.question,
                evaluator: evaluator.id,
                scale_value: entry.scale_value,
                text_value: entry.text_value,
                status: save_type,
            })?;
            written += 1;
        }

        let rollup = manager_rollup(&self.store.manager_evaluations(response.id)?);
        tracing::info!(
            response = response.id.0,
            evaluator = evaluator.id.0,
            save_type = save_type.label(),
            written,
            rollup = rollup.label(),
            "manager evaluation saved"
        );
        Ok(rollup)
    }

    /// Save or finalize the HR comment for a response. The row is created
    /// lazily on first save; draft and completed may alternate freely, last
    /// write wins.
    pub fn set_hr_comment(
        &self,
        author: UserId,
        response: ResponseId,
        comment: String,
        action: HrAction,
    ) -> Result<HrEvaluation, WorkflowError> {
        let author = self.user(author)?;
        let response = self
            .store
            .response(response)?
            .ok_or(WorkflowError::NotFound)?;

        if !access::can_finalize_hr(&author) {
            return Err(WorkflowError::Forbidden);
        }

        let mut row = self
            .store
            .hr_evaluation(response.id)?
            .unwrap_or_else(|| HrEvaluation::new(response.id));

        row.comment = comment;
        match action {
            HrAction::Draft => {
                row.status = HrStatus::Draft;
                row.completed_at = None;
                row.completed_by = None;
            }
            HrAction::Completed => {
                row.status = HrStatus::Completed;
                row.completed_at = Some(Utc::now());
                row.completed_by = Some(author.id);
            }
        }

        self.store.upsert_hr_evaluation(row.clone())?;
        tracing::info!(
            response = response.id.0,
            author = author.id.0,
            status = row.status.label(),
            "hr comment saved"
        );
        Ok(row)
    }
}
