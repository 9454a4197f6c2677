use std::sync::Arc;

use serde::Serialize;

use crate::workflows::directory::domain::{DepartmentId, UserId};
use crate::workflows::directory::repository::{DirectoryRepository, RepositoryError};
use crate::workflows::evaluation::access;
use crate::workflows::evaluation::domain::SurveyId;
use crate::workflows::evaluation::repository::EvaluationRepository;
use crate::workflows::evaluation::scoring::overall_percentage;

/// Error raised by the report service.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("viewer is not allowed to open reports")]
    Forbidden,
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One bar of the department comparison chart.
#[derive(Debug, Clone, Serialize)]
pub struct ReportBar {
    pub employee: UserId,
    pub label: String,
    pub percentage: f64,
}

/// Department-wide standing over the newest survey that has submissions.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentReport {
    pub department: DepartmentId,
    pub survey: SurveyId,
    pub survey_name: String,
    pub bars: Vec<ReportBar>,
}

/// One point of an employee's score history.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPoint {
    pub label: String,
    pub percentage: f64,
}

/// Read-only aggregation over finished evaluations. Chart rendering stays
/// outside; this service returns plain label/percentage series.
pub struct ReportService<D, E> {
    directory: Arc<D>,
    store: Arc<E>,
}

impl<D, E> ReportService<D, E>
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    pub fn new(directory: Arc<D>, store: Arc<E>) -> Self {
        Self { directory, store }
    }

    /// One bar per employee of `department` with evaluator rows on the
    /// newest survey carrying turned-in responses, sorted best first.
    /// Employees nobody has scored yet are left out rather than shown at
    /// zero.
    pub fn department_report(
        &self,
        viewer: UserId,
        department: DepartmentId,
    ) -> Result<DepartmentReport, ReportError> {
        let viewer = self
            .directory
            .user(viewer)?
            .ok_or(ReportError::NotFound)?;
        if !access::can_view_reports(&viewer) {
            return Err(ReportError::Forbidden);
        }
        self.directory
            .department(department)?
            .ok_or(ReportError::NotFound)?;

        let employees = self.directory.users_in_department(department)?;

        for survey in self.store.surveys_for_department(department)? {
            let mut bars = Vec::new();
            let mut saw_submission = false;

            for employee in &employees {
                let Some(response) = self.store.response_for(survey.id, employee.id)? else {
                    continue;
                };
                if !response.status.is_turned_in() {
                    continue;
                }
                saw_submission = true;

                let rows = self.store.manager_evaluations(response.id)?;
                if rows.is_empty() {
                    continue;
                }
                bars.push(ReportBar {
                    employee: employee.id,
                    label: employee.display_name.clone(),
                    percentage: overall_percentage(rows.iter().map(|row| row.scale_value)),
                });
            }

            if saw_submission {
                bars.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
                return Ok(DepartmentReport {
                    department,
                    survey: survey.id,
                    survey_name: survey.name,
                    bars,
                });
            }
        }

        Err(ReportError::NotFound)
    }

    /// Score history of one employee, newest response first, one point per
    /// turned-in response that has evaluator rows.
    pub fn employee_report(
        &self,
        viewer: UserId,
        employee: UserId,
    ) -> Result<Vec<ReportPoint>, ReportError> {
        let viewer = self
            .directory
            .user(viewer)?
            .ok_or(ReportError::NotFound)?;
        let employee = self
            .directory
            .user(employee)?
            .ok_or(ReportError::NotFound)?;

        if !access::can_view_reports(&viewer)
            || !access::can_view_employee_surveys(&viewer, &employee)
        {
            return Err(ReportError::Forbidden);
        }

        let mut points = Vec::new();
        for response in self.store.responses_for_user(employee.id)? {
            if !response.status.is_turned_in() {
                continue;
            }
            let rows = self.store.manager_evaluations(response.id)?;
            if rows.is_empty() {
                continue;
            }
            points.push(ReportPoint {
                label: response.created_at.format("%Y-%m-%d").to_string(),
                percentage: overall_percentage(rows.iter().map(|row| row.scale_value)),
            });
        }
        Ok(points)
    }
}
