use super::common::*;
use crate::workflows::directory::domain::Role;
use crate::workflows::evaluation::access::{
    can_finalize_hr, can_score_responses, can_view_employee_surveys, can_view_reports,
    can_view_response,
};

#[test]
fn hr_and_admin_see_every_response() {
    let hr = build_user(HR, Role::Hr, None, None);
    let admin = build_user(ADMIN, Role::Admin, None, None);
    let employee = build_user(EMPLOYEE, Role::Employee, Some(ENGINEERING), Some(LEADER));

    assert!(can_view_response(&hr, &employee));
    assert!(can_view_response(&admin, &employee));
}

#[test]
fn superuser_flag_grants_visibility_regardless_of_role() {
    let mut viewer = build_user(PEER, Role::Employee, Some(OPERATIONS), None);
    viewer.is_superuser = true;
    let employee = build_user(EMPLOYEE, Role::Employee, Some(ENGINEERING), Some(LEADER));

    assert!(can_view_response(&viewer, &employee));
    assert!(can_view_employee_surveys(&viewer, &employee));
}

#[test]
fn manager_sees_own_department_only() {
    let manager = build_user(MANAGER, Role::Manager, Some(ENGINEERING), None);
    let same_dept = build_user(EMPLOYEE, Role::Employee, Some(ENGINEERING), Some(LEADER));
    let other_dept = build_user(PEER, Role::Employee, Some(OPERATIONS), None);

    assert!(can_view_response(&manager, &same_dept));
    assert!(!can_view_response(&manager, &other_dept));
}

#[test]
fn team_leader_sees_self_and_assigned_members() {
    let leader = build_user(LEADER, Role::TeamLeader, Some(ENGINEERING), None);
    let member = build_user(EMPLOYEE, Role::Employee, Some(ENGINEERING), Some(LEADER));
    let unassigned = build_user(PEER, Role::Employee, Some(ENGINEERING), None);

    assert!(can_view_response(&leader, &leader));
    assert!(can_view_response(&leader, &member));
    assert!(!can_view_response(&leader, &unassigned));
}

#[test]
fn employee_sees_only_themselves() {
    let employee = build_user(EMPLOYEE, Role::Employee, Some(ENGINEERING), Some(LEADER));
    let peer = build_user(PEER, Role::Employee, Some(ENGINEERING), None);

    assert!(can_view_response(&employee, &employee));
    assert!(!can_view_response(&employee, &peer));
}

#[test]
fn employee_never_browses_survey_listings() {
    let employee = build_user(EMPLOYEE, Role::Employee, Some(ENGINEERING), Some(LEADER));

    assert!(!can_view_employee_surveys(&employee, &employee));
}

#[test]
fn team_leader_listing_excludes_self() {
    let leader = build_user(LEADER, Role::TeamLeader, Some(ENGINEERING), None);
    let member = build_user(EMPLOYEE, Role::Employee, Some(ENGINEERING), Some(LEADER));

    assert!(can_view_employee_surveys(&leader, &member));
    assert!(!can_view_employee_surveys(&leader, &leader));
}

#[test]
fn scoring_is_a_manager_capability() {
    let manager = build_user(MANAGER, Role::Manager, Some(ENGINEERING), None);
    let admin = build_user(ADMIN, Role::Admin, None, None);
    let hr = build_user(HR, Role::Hr, None, None);
    let leader = build_user(LEADER, Role::TeamLeader, Some(ENGINEERING), None);

    assert!(can_score_responses(&manager));
    assert!(can_score_responses(&admin));
    assert!(!can_score_responses(&hr));
    assert!(!can_score_responses(&leader));
}

#[test]
fn finalization_is_an_hr_capability() {
    let hr = build_user(HR, Role::Hr, None, None);
    let admin = build_user(ADMIN, Role::Admin, None, None);
    let manager = build_user(MANAGER, Role::Manager, Some(ENGINEERING), None);

    assert!(can_finalize_hr(&hr));
    assert!(can_finalize_hr(&admin));
    assert!(!can_finalize_hr(&manager));
}

#[test]
fn reports_are_closed_to_plain_employees() {
    let employee = build_user(EMPLOYEE, Role::Employee, Some(ENGINEERING), Some(LEADER));
    let leader = build_user(LEADER, Role::TeamLeader, Some(ENGINEERING), None);
    let manager = build_user(MANAGER, Role::Manager, Some(ENGINEERING), None);

    assert!(!can_view_reports(&employee));
    assert!(can_view_reports(&leader));
    assert!(can_view_reports(&manager));
}

#[test]
fn department_less_manager_matches_department_less_respondent() {
    let manager = build_user(MANAGER, Role::Manager, None, None);
    let drifting = build_user(PEER, Role::Employee, None, None);
    let housed = build_user(EMPLOYEE, Role::Employee, Some(ENGINEERING), None);

    assert!(can_view_response(&manager, &drifting));
    assert!(!can_view_response(&manager, &housed));
}
