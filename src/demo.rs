use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};

use review_cycle::error::AppError;
use review_cycle::infra::InMemoryStore;
use review_cycle::workflows::directory::{Department, DepartmentId, Role, User, UserId};
use review_cycle::workflows::evaluation::{
    Competency, CompetencyId, EvaluationEntry, EvaluationStatus, HrAction, Question,
    QuestionAudience, QuestionId, QuestionKind, QuestionLifecycle, ResponseId, ResponseStatus,
    ReviewService, Survey, SurveyAnswer, SurveyAudience, SurveyId, SurveyResponse,
};
use review_cycle::workflows::reports::ReportService;

pub(crate) const ENGINEERING: DepartmentId = DepartmentId(1);
pub(crate) const HR_LEAD: UserId = UserId(1);
pub(crate) const MANAGER: UserId = UserId(2);
pub(crate) const TEAM_LEADER: UserId = UserId(3);
pub(crate) const EMPLOYEE: UserId = UserId(4);
pub(crate) const RESPONSE: ResponseId = ResponseId(1);

fn user(id: UserId, name: &str, role: Role, team_leader: Option<UserId>) -> User {
    User {
        id,
        display_name: name.to_string(),
        email: Some(format!(
            "{}@example.com",
            name.to_lowercase().replace(' ', ".")
        )),
        role,
        department: Some(ENGINEERING),
        team_leader,
        is_superuser: false,
        is_active: true,
        hired_on: NaiveDate::from_ymd_opt(2023, 3, 1).expect("valid hire date"),
    }
}

fn question(id: u64, competency: u64, text: &str) -> Question {
    Question {
        id: QuestionId(id),
        text: text.to_string(),
        competency: Some(CompetencyId(competency)),
        kind: QuestionKind::Both,
        audience: QuestionAudience::Both,
        lifecycle: QuestionLifecycle::Active,
    }
}

/// Populate the store with one department mid-cycle: the employee has turned
/// their self-assessment in, nobody has evaluated it yet.
pub(crate) fn seed(store: &InMemoryStore) {
    use review_cycle::workflows::directory::DirectoryRepository;

    store
        .upsert_department(Department {
            id: ENGINEERING,
            name: "Engineering".to_string(),
        })
        .expect("seed department");

    for account in [
        user(HR_LEAD, "Priya Nair", Role::Hr, None),
        user(MANAGER, "Marcus Webb", Role::Manager, None),
        user(TEAM_LEADER, "Elena Sorokina", Role::TeamLeader, None),
        user(EMPLOYEE, "Jonas Brandt", Role::Employee, Some(TEAM_LEADER)),
    ] {
        store.upsert_user(account).expect("seed user");
    }

    for (id, name, description) in [
        (1, "Communication", "Shares context and listens"),
        (2, "Delivery", "Ships predictably"),
        (3, "Ownership", "Follows problems through"),
    ] {
        store.insert_competency(Competency {
            id: CompetencyId(id),
            name: name.to_string(),
            description: description.to_string(),
        });
    }

    let questions = vec![
        question(1, 1, "How clearly do you communicate decisions?"),
        question(2, 1, "How well do you keep stakeholders informed?"),
        question(3, 2, "How reliably do you meet commitments?"),
        question(4, 2, "How well do you scope your work?"),
        question(5, 3, "How proactively do you pick up loose ends?"),
        question(6, 3, "How well do you handle incidents you caused?"),
    ];
    for item in &questions {
        store.insert_question(item.clone());
    }

    let created_at = Utc
        .with_ymd_and_hms(2026, 1, 15, 9, 0, 0)
        .single()
        .expect("valid survey timestamp");
    store.insert_survey(Survey::compose(
        SurveyId(1),
        "Engineering Annual Review 2026",
        ENGINEERING,
        Some(2026),
        SurveyAudience::Employee,
        &questions,
        created_at,
    ));

    store.insert_response(SurveyResponse {
        id: RESPONSE,
        survey: SurveyId(1),
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
}

fn entries(values: &[(u64, u8)]) -> Vec<EvaluationEntry> {
    values
        .iter()
        .map(|(question, scale)| EvaluationEntry {
            question: QuestionId(*question),
            scale_value: Some(*scale),
            text_value: String::new(),
        })
        .collect()
}

/// Walk one response through the full cycle, printing each stage.
pub(crate) fn run_demo() -> Result<(), AppError> {
    let store = Arc::new(InMemoryStore::default());
    seed(&store);

    let reviews = ReviewService::new(store.clone(), store.clone());
    let reports = ReportService::new(store.clone(), store.clone());

    println!("Performance review demo");

    println!("\nEmployee home before evaluation");
    for standing in reviews.home_overview(EMPLOYEE)? {
        println!(
            "- {} | response {} | manager {} | hr {} | overview visible: {}",
            standing.survey_name,
            standing
                .response_status
                .map(|status| status.label())
                .unwrap_or("none"),
            standing.manager_status.label(),
            standing.hr_status.label(),
            standing.show_overview
        );
    }

    println!("\nManager saves a draft, then submits");
    reviews.save_manager_evaluation(
        MANAGER,
        RESPONSE,
        entries(&[(1, 10), (2, 10)]),
        EvaluationStatus::Draft,
    )?;
    let rollup = reviews.save_manager_evaluation(
        MANAGER,
        RESPONSE,
        entries(&[(1, 10), (2, 10), (3, 7), (4, 8), (5, 9), (6, 8)]),
        EvaluationStatus::Submitted,
    )?;
    println!("- manager track now {}", rollup.label());

    println!("\nHR drafts a comment, then completes");
    reviews.set_hr_comment(
        HR_LEAD,
        RESPONSE,
        "Strong year; watch scoping.".to_string(),
        HrAction::Draft,
    )?;
    let hr = reviews.set_hr_comment(
        HR_LEAD,
        RESPONSE,
        "Strong year overall. Keep investing in scoping.".to_string(),
        HrAction::Completed,
    )?;
    println!(
        "- hr track now {} (completed at {})",
        hr.status.label(),
        hr.completed_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_default()
    );

    println!("\nEmployee opens the finished overview");
    let overview = reviews.response_overview(EMPLOYEE, RESPONSE)?;
    println!("- radar shown: {}", overview.show_radar);
    for score in &overview.self_series {
        println!("- self {}: {:.2}%", score.label, score.percentage);
    }
    if let Some(series) = &overview.manager_series {
        for score in series {
            println!("- manager {}: {:.2}%", score.label, score.percentage);
        }
    }
    if let Some(overall) = overview.manager_overall {
        println!("- manager overall: {overall:.2}%");
    }
    if let Some(comment) = &overview.hr_comment {
        println!("- hr comment: {comment}");
    }

    println!("\nDepartment report (manager view)");
    let report = reports.department_report(MANAGER, ENGINEERING)?;
    println!("- survey: {}", report.survey_name);
    for bar in &report.bars {
        println!("- {}: {:.2}%", bar.label, bar.percentage);
    }

    Ok(())
}
