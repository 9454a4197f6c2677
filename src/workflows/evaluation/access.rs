//! Viewer access rules for survey responses and per-employee survey listings.
//!
//! Every entry point funnels through these two functions instead of carrying
//! its own role checks; the viewer is always passed explicitly.

use crate::workflows::directory::domain::{Role, User};

/// Whether `viewer` may open the response belonging to `respondent`.
///
/// Rules are evaluated in order, first match wins:
/// 1. HR, admins, and superusers see everything.
/// 2. Managers see respondents of their own department.
/// 3. Team leaders see themselves and their assigned members.
/// 4. Employees see only themselves.
pub fn can_view_response(viewer: &User, respondent: &User) -> bool {
    if viewer.is_privileged() {
        return true;
    }

    match viewer.role {
        Role::Manager => respondent.department == viewer.department,
        Role::TeamLeader => {
            respondent.id == viewer.id || respondent.team_leader == Some(viewer.id)
        }
        Role::Employee => respondent.id == viewer.id,
        // Privileged roles already returned above.
        Role::Hr | Role::Admin => true,
    }
}

/// Whether `viewer` may browse the survey list of `employee`.
///
/// Stricter than [`can_view_response`]: employees are always denied here —
/// they reach their own surveys through the home listing — and team leaders
/// see only their assigned members, not themselves.
pub fn can_view_employee_surveys(viewer: &User, employee: &User) -> bool {
    if viewer.is_privileged() {
        return true;
    }

    match viewer.role {
        Role::Manager => employee.department == viewer.department,
        Role::TeamLeader => employee.team_leader == Some(viewer.id),
        Role::Employee => false,
        Role::Hr | Role::Admin => true,
    }
}

/// Whether `viewer` may write evaluator scoring rows. Scoring is a
/// manager/admin capability; access to the response is checked separately.
pub fn can_score_responses(viewer: &User) -> bool {
    matches!(viewer.role, Role::Manager | Role::Admin) || viewer.is_superuser
}

/// Whether `viewer` may author the HR finalization comment.
pub fn can_finalize_hr(viewer: &User) -> bool {
    matches!(viewer.role, Role::Hr | Role::Admin) || viewer.is_superuser
}

/// Whether `viewer` may open aggregate reports (department bars, per-employee
/// history). Everyone except plain employees.
pub fn can_view_reports(viewer: &User) -> bool {
    matches!(
        viewer.role,
        Role::Manager | Role::TeamLeader | Role::Hr | Role::Admin
    ) || viewer.is_superuser
}
