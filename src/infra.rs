//! In-memory implementations of the repository seams, backing the demo
//! command and the test suites. A real deployment would put a database
//! behind the same traits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::workflows::directory::domain::{Department, DepartmentId, Role, User, UserId};
use crate::workflows::directory::repository::{DirectoryRepository, RepositoryError};
use crate::workflows::directory::service::{
    CredentialsNote, CredentialsNotifier, NotificationError,
};
use crate::workflows::evaluation::domain::{
    Competency, CompetencyId, HrEvaluation, ManagerEvaluation, Question, QuestionId, ResponseId,
    Survey, SurveyAnswer, SurveyId, SurveyResponse,
};
use crate::workflows::evaluation::repository::EvaluationRepository;

/// One store carrying both the directory and the evaluation data, shared via
/// `Arc` clones.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    departments: Arc<Mutex<HashMap<DepartmentId, Department>>>,
    competencies: Arc<Mutex<HashMap<CompetencyId, Competency>>>,
    questions: Arc<Mutex<HashMap<QuestionId, Question>>>,
    surveys: Arc<Mutex<HashMap<SurveyId, Survey>>>,
    responses: Arc<Mutex<HashMap<ResponseId, SurveyResponse>>>,
    answers: Arc<Mutex<Vec<SurveyAnswer>>>,
    manager_rows: Arc<Mutex<HashMap<(ResponseId, QuestionId, UserId), ManagerEvaluation>>>,
    hr_rows: Arc<Mutex<HashMap<ResponseId, HrEvaluation>>>,
}

impl InMemoryStore {
    pub fn insert_competency(&self, competency: Competency) {
        self.competencies
            .lock()
            .expect("store mutex poisoned")
            .insert(competency.id, competency);
    }

    pub fn insert_question(&self, question: Question) {
        self.questions
            .lock()
            .expect("store mutex poisoned")
            .insert(question.id, question);
    }

    pub fn insert_survey(&self, survey: Survey) {
        self.surveys
            .lock()
            .expect("store mutex poisoned")
            .insert(survey.id, survey);
    }

    pub fn insert_response(&self, response: SurveyResponse) {
        self.responses
            .lock()
            .expect("store mutex poisoned")
            .insert(response.id, response);
    }

    /// Insert-or-overwrite the (response, question) answer.
    pub fn insert_answer(&self, answer: SurveyAnswer) {
        let mut guard = self.answers.lock().expect("store mutex poisoned");
        match guard
            .iter_mut()
            .find(|row| row.response == answer.response && row.question == answer.question)
        {
            Some(existing) => *existing = answer,
            None => guard.push(answer),
        }
    }
}

impl DirectoryRepository for InMemoryStore {
    fn user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let guard = self.users.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn department(&self, id: DepartmentId) -> Result<Option<Department>, RepositoryError> {
        let guard = self.departments.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn departments(&self) -> Result<Vec<Department>, RepositoryError> {
        let guard = self.departments.lock().expect("store mutex poisoned");
        let mut departments: Vec<Department> = guard.values().cloned().collect();
        departments.sort_by_key(|department| department.id);
        Ok(departments)
    }

    fn users(&self) -> Result<Vec<User>, RepositoryError> {
        let guard = self.users.lock().expect("store mutex poisoned");
        let mut users: Vec<User> = guard.values().cloned().collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    fn users_in_department(&self, id: DepartmentId) -> Result<Vec<User>, RepositoryError> {
        let guard = self.users.lock().expect("store mutex poisoned");
        let mut users: Vec<User> = guard
            .values()
            .filter(|user| user.department == Some(id))
            .cloned()
            .collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    fn users_with_role(&self, role: Role) -> Result<Vec<User>, RepositoryError> {
        let guard = self.users.lock().expect("store mutex poisoned");
        let mut users: Vec<User> = guard
            .values()
            .filter(|user| user.role == role)
            .cloned()
            .collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    fn team_members(&self, leader: UserId) -> Result<Vec<User>, RepositoryError> {
        let guard = self.users.lock().expect("store mutex poisoned");
        let mut members: Vec<User> = guard
            .values()
            .filter(|user| user.is_active && user.team_leader == Some(leader))
            .cloned()
            .collect();
        members.sort_by_key(|user| user.id);
        Ok(members)
    }

    fn upsert_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut guard = self.users.lock().expect("store mutex poisoned");
        guard.insert(user.id, user);
        Ok(())
    }

    fn upsert_department(&self, department: Department) -> Result<(), RepositoryError> {
        let mut guard = self.departments.lock().expect("store mutex poisoned");
        guard.insert(department.id, department);
        Ok(())
    }

    fn delete_user(&self, id: UserId) -> Result<(), RepositoryError> {
        let mut guard = self.users.lock().expect("store mutex poisoned");
        if guard.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn delete_department(&self, id: DepartmentId) -> Result<(), RepositoryError> {
        {
            let mut guard = self.departments.lock().expect("store mutex poisoned");
            if guard.remove(&id).is_none() {
                return Err(RepositoryError::NotFound);
            }
        }
        let mut guard = self.users.lock().expect("store mutex poisoned");
        for user in guard.values_mut() {
            if user.department == Some(id) {
                user.department = None;
            }
        }
        Ok(())
    }
}

impl EvaluationRepository for InMemoryStore {
    fn survey(&self, id: SurveyId) -> Result<Option<Survey>, RepositoryError> {
        let guard = self.surveys.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn surveys_for_department(&self, id: DepartmentId) -> Result<Vec<Survey>, RepositoryError> {
        let guard = self.surveys.lock().expect("store mutex poisoned");
        let mut surveys: Vec<Survey> = guard
            .values()
            .filter(|survey| survey.department == id)
            .cloned()
            .collect();
        surveys.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(surveys)
    }

    fn questions(&self, ids: &[QuestionId]) -> Result<Vec<Question>, RepositoryError> {
        let guard = self.questions.lock().expect("store mutex poisoned");
        Ok(ids
            .iter()
            .filter_map(|id| guard.get(id).cloned())
            .collect())
    }

    fn competencies(&self) -> Result<Vec<Competency>, RepositoryError> {
        let guard = self.competencies.lock().expect("store mutex poisoned");
        let mut competencies: Vec<Competency> = guard.values().cloned().collect();
        competencies.sort_by_key(|competency| competency.id);
        Ok(competencies)
    }

    fn response(&self, id: ResponseId) -> Result<Option<SurveyResponse>, RepositoryError> {
        let guard = self.responses.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn response_for(
        &self,
        survey: SurveyId,
        respondent: UserId,
    ) -> Result<Option<SurveyResponse>, RepositoryError> {
        let guard = self.responses.lock().expect("store mutex poisoned");
        Ok(guard
            .values()
            .find(|response| response.survey == survey && response.respondent == respondent)
            .cloned())
    }

    fn responses_for_user(
        &self,
        respondent: UserId,
    ) -> Result<Vec<SurveyResponse>, RepositoryError> {
        let guard = self.responses.lock().expect("store mutex poisoned");
        let mut responses: Vec<SurveyResponse> = guard
            .values()
            .filter(|response| response.respondent == respondent)
            .cloned()
            .collect();
        responses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(responses)
    }

    fn answers(&self, response: ResponseId) -> Result<Vec<SurveyAnswer>, RepositoryError> {
        let guard = self.answers.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|answer| answer.response == response)
            .cloned()
            .collect())
    }

    fn manager_evaluations(
        &self,
        response: ResponseId,
    ) -> Result<Vec<ManagerEvaluation>, RepositoryError> {
        let guard = self.manager_rows.lock().expect("store mutex poisoned");
        let mut rows: Vec<ManagerEvaluation> = guard
            .values()
            .filter(|row| row.response == response)
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.question, row.evaluator));
        Ok(rows)
    }

    fn manager_evaluations_by(
        &self,
        response: ResponseId,
        evaluator: UserId,
    ) -> Result<Vec<ManagerEvaluation>, RepositoryError> {
        let guard = self.manager_rows.lock().expect("store mutex poisoned");
        let mut rows: Vec<ManagerEvaluation> = guard
            .values()
            .filter(|row| row.response == response && row.evaluator == evaluator)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.question);
        Ok(rows)
    }

    fn upsert_manager_evaluation(&self, row: ManagerEvaluation) -> Result<(), RepositoryError> {
        let mut guard = self.manager_rows.lock().expect("store mutex poisoned");
        guard.insert((row.response, row.question, row.evaluator), row);
        Ok(())
    }

    fn hr_evaluation(&self, response: ResponseId) -> Result<Option<HrEvaluation>, RepositoryError> {
        let guard = self.hr_rows.lock().expect("store mutex poisoned");
        Ok(guard.get(&response).cloned())
    }

    fn upsert_hr_evaluation(&self, row: HrEvaluation) -> Result<(), RepositoryError> {
        let mut guard = self.hr_rows.lock().expect("store mutex poisoned");
        guard.insert(row.response, row);
        Ok(())
    }
}

/// Notifier that records notes instead of sending mail.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    notes: Arc<Mutex<Vec<CredentialsNote>>>,
}

impl RecordingNotifier {
    pub fn notes(&self) -> Vec<CredentialsNote> {
        self.notes.lock().expect("notifier mutex poisoned").clone()
    }
}

impl CredentialsNotifier for RecordingNotifier {
    fn notify(&self, note: CredentialsNote) -> Result<(), NotificationError> {
        let mut guard = self.notes.lock().expect("notifier mutex poisoned");
        guard.push(note);
        Ok(())
    }
}
