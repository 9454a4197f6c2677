use chrono::{NaiveDate, TimeZone, Utc};

use super::common::{scale_question, ENGINEERING, SURVEY};
use crate::workflows::evaluation::domain::{
    offered_after_hire, QuestionAudience, QuestionId, QuestionLifecycle, Survey, SurveyAudience,
};

fn created_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[test]
fn composition_drops_retired_questions() {
    let mut retired = scale_question(2, Some(1));
    retired.lifecycle = QuestionLifecycle::Retired;
    let candidates = vec![scale_question(1, Some(1)), retired];

    let survey = Survey::compose(
        SURVEY,
        "Cycle",
        ENGINEERING,
        Some(2026),
        SurveyAudience::Employee,
        &candidates,
        created_at(),
    );

    assert_eq!(survey.questions, vec![QuestionId(1)]);
}

#[test]
fn composition_keeps_only_questions_for_the_audience() {
    let mut manager_only = scale_question(2, Some(1));
    manager_only.audience = QuestionAudience::Manager;
    let candidates = vec![scale_question(1, Some(1)), manager_only];

    let survey = Survey::compose(
        SURVEY,
        "Cycle",
        ENGINEERING,
        Some(2026),
        SurveyAudience::Employee,
        &candidates,
        created_at(),
    );

    assert_eq!(survey.questions, vec![QuestionId(1)]);
}

#[test]
fn surveys_predating_the_hire_are_not_offered() {
    let survey = Survey::compose(
        SURVEY,
        "Cycle",
        ENGINEERING,
        Some(2026),
        SurveyAudience::Employee,
        &[scale_question(1, Some(1))],
        created_at(),
    );

    let before = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
    let same_day = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
    let after = NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date");

    assert!(offered_after_hire(&survey, before));
    assert!(offered_after_hire(&survey, same_day));
    assert!(!offered_after_hire(&survey, after));
}
