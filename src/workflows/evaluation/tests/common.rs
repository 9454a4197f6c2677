use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::infra::InMemoryStore;
use crate::workflows::directory::domain::{Department, DepartmentId, Role, User, UserId};
use crate::workflows::directory::repository::DirectoryRepository;
use crate::workflows::evaluation::domain::{
    Competency, CompetencyId, Question, QuestionAudience, QuestionId, QuestionKind,
    QuestionLifecycle, ResponseId, ResponseStatus, Survey, SurveyAnswer, SurveyAudience, SurveyId,
    SurveyResponse,
};
use crate::workflows::evaluation::service::ReviewService;

pub(super) const ENGINEERING: DepartmentId = DepartmentId(1);
pub(super) const OPERATIONS: DepartmentId = DepartmentId(2);

pub(super) const HR: UserId = UserId(1);
pub(super) const MANAGER: UserId = UserId(2);
pub(super) const LEADER: UserId = UserId(3);
pub(super) const EMPLOYEE: UserId = UserId(4);
pub(super) const OTHER_MANAGER: UserId = UserId(5);
pub(super) const PEER: UserId = UserId(6);
pub(super) const ADMIN: UserId = UserId(7);

pub(super) const SURVEY: SurveyId = SurveyId(1);
pub(super) const RESPONSE: ResponseId = ResponseId(1);

pub(super) fn build_user(
    id: UserId,
    role: Role,
    department: Option<DepartmentId>,
    team_leader: Option<UserId>,
) -> User {
    User {
        id,
        display_name: format!("user-{}", id.0),
        email: None,
        role,
        department,
        team_leader,
        is_superuser: false,
        is_active: true,
        hired_on: NaiveDate::from_ymd_opt(2023, 3, 1).expect("valid hire date"),
    }
}

pub(super) fn scale_question(id: u64, competency: Option<u64>) -> Question {
    Question {
        id: QuestionId(id),
        text: format!("question-{id}"),
        competency: competency.map(CompetencyId),
        kind: QuestionKind::Both,
        audience: QuestionAudience::Both,
        lifecycle: QuestionLifecycle::Active,
    }
}

/// One department mid-cycle: the employee has submitted their answers, no
/// evaluator or HR rows exist yet. Communication carries the 7/7 self
/// answers the overview assertions rely on.
pub(super) fn seed_cycle() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::default());

    for department in [
        Department {
            id: ENGINEERING,
            name: "Engineering".to_string(),
        },
        Department {
            id: OPERATIONS,
            name: "Operations".to_string(),
        },
    ] {
        store.upsert_department(department).expect("seed department");
    }

    for user in [
        build_user(HR, Role::Hr, None, None),
        build_user(MANAGER, Role::Manager, Some(ENGINEERING), None),
        build_user(LEADER, Role::TeamLeader, Some(ENGINEERING), None),
        build_user(EMPLOYEE, Role::Employee, Some(ENGINEERING), Some(LEADER)),
        build_user(OTHER_MANAGER, Role::Manager, Some(OPERATIONS), None),
        build_user(PEER, Role::Employee, Some(ENGINEERING), None),
        build_user(ADMIN, Role::Admin, None, None),
    ] {
        store.upsert_user(user).expect("seed user");
    }

    for (id, name) in [(1, "Communication"), (2, "Delivery"), (3, "Ownership")] {
        store.insert_competency(Competency {
            id: CompetencyId(id),
            name: name.to_string(),
            description: String::new(),
        });
    }

    let questions = vec![
        scale_question(1, Some(1)),
        scale_question(2, Some(1)),
        scale_question(3, Some(2)),
        scale_question(4, Some(2)),
        scale_question(5, Some(3)),
        scale_question(6, Some(3)),
    ];
    for question in &questions {
        store.insert_question(question.clone());
    }

    let created_at = Utc
        .with_ymd_and_hms(2026, 1, 15, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    store.insert_survey(Survey::compose(
        SURVEY,
        "Engineering Annual Review 2026",
        ENGINEERING,
        Some(2026),
        SurveyAudience::Employee,
        &questions,
        created_at,
    ));

    store.insert_response(SurveyResponse {
        id: RESPONSE,
        survey: SURVEY,
        respondent: EMPLOYEE,
        status: ResponseStatus::Submitted,
        created_at,
        updated_at: created_at,
    });

    for (question, scale) in [(1, 7), (2, 7), (3, 8), (4, 6), (5, 9), (6, 10)] {
        store.insert_answer(SurveyAnswer {
            response: RESPONSE,
            question: QuestionId(question),
            scale_value: Some(scale),
            text_value: String::new(),
        });
    }

    store
}

pub(super) fn build_service(
    store: Arc<InMemoryStore>,
) -> ReviewService<InMemoryStore, InMemoryStore> {
    ReviewService::new(store.clone(), store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
