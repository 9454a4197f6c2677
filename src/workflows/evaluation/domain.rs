use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::directory::domain::{DepartmentId, Role, UserId};

/// Identifier wrapper for competencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompetencyId(pub u64);

/// Identifier wrapper for survey questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub u64);

/// Identifier wrapper for surveys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurveyId(pub u64);

/// Identifier wrapper for survey responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResponseId(pub u64);

/// Highest value on the scoring scale; answers range 0..=SCALE_MAX.
pub const SCALE_MAX: u8 = 10;

/// Named skill dimension grouping questions for aggregate scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competency {
    pub id: CompetencyId,
    pub name: String,
    pub description: String,
}

/// What kind of input a question collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Scale,
    Text,
    Both,
}

impl QuestionKind {
    pub const fn collects_scale(self) -> bool {
        matches!(self, QuestionKind::Scale | QuestionKind::Both)
    }

    pub const fn collects_text(self) -> bool {
        matches!(self, QuestionKind::Text | QuestionKind::Both)
    }
}

/// Who a question is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionAudience {
    Employee,
    Manager,
    Both,
}

impl QuestionAudience {
    pub const fn addresses(self, audience: SurveyAudience) -> bool {
        match self {
            QuestionAudience::Both => true,
            QuestionAudience::Employee => matches!(audience, SurveyAudience::Employee),
            QuestionAudience::Manager => matches!(audience, SurveyAudience::Manager),
        }
    }
}

/// Lifecycle of a question. Retired questions are excluded from new surveys
/// but remain referenced by historical answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionLifecycle {
    Active,
    Retired,
}

/// A survey question, optionally attached to a competency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub competency: Option<CompetencyId>,
    pub kind: QuestionKind,
    pub audience: QuestionAudience,
    pub lifecycle: QuestionLifecycle,
}

/// Which role a survey targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyAudience {
    Employee,
    Manager,
    TeamLeader,
}

impl SurveyAudience {
    pub const fn label(self) -> &'static str {
        match self {
            SurveyAudience::Employee => "employee",
            SurveyAudience::Manager => "manager",
            SurveyAudience::TeamLeader => "team_leader",
        }
    }

    pub const fn matches(self, role: Role) -> bool {
        matches!(
            (self, role),
            (SurveyAudience::Employee, Role::Employee)
                | (SurveyAudience::Manager, Role::Manager)
                | (SurveyAudience::TeamLeader, Role::TeamLeader)
        )
    }
}

/// A survey definition: an ordered question set for one department and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub name: String,
    pub department: DepartmentId,
    pub year: Option<u16>,
    pub audience: SurveyAudience,
    /// Question order matters for display only, never for semantics.
    pub questions: Vec<QuestionId>,
    pub created_at: DateTime<Utc>,
}

impl Survey {
    /// Build a survey from a candidate question pool, keeping only active
    /// questions addressed to the survey's audience. The lifecycle match is
    /// exhaustive so a new lifecycle state cannot slip through silently.
    pub fn compose(
        id: SurveyId,
        name: impl Into<String>,
        department: DepartmentId,
        year: Option<u16>,
        audience: SurveyAudience,
        candidates: &[Question],
        created_at: DateTime<Utc>,
    ) -> Self {
        let questions = candidates
            .iter()
            .filter(|question| match question.lifecycle {
                QuestionLifecycle::Active => question.audience.addresses(audience),
                QuestionLifecycle::Retired => false,
            })
            .map(|question| question.id)
            .collect();

        Self {
            id,
            name: name.into(),
            department,
            year,
            audience,
            questions,
            created_at,
        }
    }
}

/// Lifecycle of one respondent's submission of one survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Draft,
    Submitted,
    Closed,
}

impl ResponseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ResponseStatus::Draft => "draft",
            ResponseStatus::Submitted => "submitted",
            ResponseStatus::Closed => "closed",
        }
    }

    /// Whether the respondent has finished filling the survey in.
    pub const fn is_turned_in(self) -> bool {
        matches!(self, ResponseStatus::Submitted | ResponseStatus::Closed)
    }
}

/// One respondent's submission of one survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: ResponseId,
    pub survey: SurveyId,
    pub respondent: UserId,
    pub status: ResponseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One (response, question) answer holding a scale value and/or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAnswer {
    pub response: ResponseId,
    pub question: QuestionId,
    pub scale_value: Option<u8>,
    pub text_value: String,
}

/// Status of a single evaluator's scoring row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Draft,
    Submitted,
}

impl EvaluationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStatus::Draft => "draft",
            EvaluationStatus::Submitted => "submitted",
        }
    }
}

/// One evaluator's score for one question of one response. Keyed by the
/// natural composite (response, question, evaluator): several evaluators may
/// score the same response independently without colliding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerEvaluation {
    pub response: ResponseId,
    pub question: QuestionId,
    pub evaluator: UserId,
    pub scale_value: Option<u8>,
    pub text_value: String,
    pub status: EvaluationStatus,
}

/// Status of the single HR finalization row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrStatus {
    Draft,
    Completed,
}

impl HrStatus {
    pub const fn label(self) -> &'static str {
        match self {
            HrStatus::Draft => "draft",
            HrStatus::Completed => "completed",
        }
    }
}

/// The HR finalization for a response; at most one exists per response.
/// `completed_at` is set iff `status == Completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrEvaluation {
    pub response: ResponseId,
    pub comment: String,
    pub status: HrStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<UserId>,
}

impl HrEvaluation {
    pub fn new(response: ResponseId) -> Self {
        Self {
            response,
            comment: String::new(),
            status: HrStatus::Draft,
            completed_at: None,
            completed_by: None,
        }
    }
}

/// Rollup of the pooled evaluator rows for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagerTrackStatus {
    NotStarted,
    Draft,
    Submitted,
}

impl ManagerTrackStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ManagerTrackStatus::NotStarted => "not_started",
            ManagerTrackStatus::Draft => "draft",
            ManagerTrackStatus::Submitted => "submitted",
        }
    }
}

/// Rollup of the HR track for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrTrackStatus {
    NotStarted,
    Draft,
    Completed,
}

impl HrTrackStatus {
    pub const fn label(self) -> &'static str {
        match self {
            HrTrackStatus::NotStarted => "not_started",
            HrTrackStatus::Draft => "draft",
            HrTrackStatus::Completed => "completed",
        }
    }
}

/// Convenience used by survey listings when filtering by hire date.
pub fn offered_after_hire(survey: &Survey, hired_on: NaiveDate) -> bool {
    survey.created_at.date_naive() >= hired_on
}
