use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{Department, DepartmentId, Role, User, UserId};
use super::repository::{DirectoryRepository, RepositoryError};

/// Error raised when dispatching a credentials notification.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notifier unavailable: {0}")]
    Unavailable(String),
}

/// Note handed to the mail collaborator when an account is created. Delivery
/// itself lives outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsNote {
    pub recipient: String,
    pub display_name: String,
}

/// Outbound hook for the credentials email sent on account creation.
pub trait CredentialsNotifier: Send + Sync {
    fn notify(&self, note: CredentialsNote) -> Result<(), NotificationError>;
}

/// Error raised by the directory service.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("actor is not allowed to administer the directory")]
    Forbidden,
    #[error("referenced team leader does not hold the team leader role")]
    NotATeamLeader,
    #[error("team member must be an active employee of the leader's department")]
    IneligibleTeamMember,
    #[error("a user cannot deactivate their own account")]
    SelfDeactivation,
    #[error("only a superuser may modify a superuser account")]
    SuperuserGuard,
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

/// Input for account creation. The id is assigned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub display_name: String,
    pub email: Option<String>,
    pub role: Role,
    pub department: Option<DepartmentId>,
    pub team_leader: Option<UserId>,
    #[serde(default)]
    pub is_superuser: bool,
    pub hired_on: chrono::NaiveDate,
    /// Employees to assign when creating a team leader; ignored otherwise.
    #[serde(default)]
    pub team_members: Vec<UserId>,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub display_name: Option<String>,
    pub email: Option<Option<String>>,
    pub role: Option<Role>,
    pub department: Option<Option<DepartmentId>>,
    /// Full replacement of a team leader's member list.
    pub team_members: Option<Vec<UserId>>,
}

/// A department with its active head count.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentOverview {
    pub department: DepartmentId,
    pub name: String,
    pub member_count: usize,
}

/// One team leader with their assigned members.
#[derive(Debug, Clone, Serialize)]
pub struct TeamOverview {
    pub leader: UserId,
    pub leader_name: String,
    pub members: Vec<UserId>,
}

/// Service owning account and team-assignment writes. Every mutation takes
/// the acting user explicitly and checks directory-admin rights first.
pub struct DirectoryService<D, N> {
    directory: Arc<D>,
    notifier: Arc<N>,
}

impl<D, N> DirectoryService<D, N>
where
    D: DirectoryRepository + 'static,
    N: CredentialsNotifier + 'static,
{
    pub fn new(directory: Arc<D>, notifier: Arc<N>) -> Self {
        Self { directory, notifier }
    }

    fn actor(&self, id: UserId) -> Result<User, DirectoryError> {
        let actor = self.directory.user(id)?.ok_or(DirectoryError::NotFound)?;
        if actor.is_directory_admin() {
            Ok(actor)
        } else {
            Err(DirectoryError::Forbidden)
        }
    }

    fn target(&self, id: UserId) -> Result<User, DirectoryError> {
        self.directory.user(id)?.ok_or(DirectoryError::NotFound)
    }

    fn next_user_id(&self) -> Result<UserId, DirectoryError> {
        let max = self
            .directory
            .users()?
            .iter()
            .map(|user| user.id.0)
            .max()
            .unwrap_or(0);
        Ok(UserId(max + 1))
    }

    fn check_team_leader_ref(&self, leader: UserId) -> Result<(), DirectoryError> {
        let leader = self.target(leader)?;
        if leader.role == Role::TeamLeader {
            Ok(())
        } else {
            Err(DirectoryError::NotATeamLeader)
        }
    }

    /// Point `member`'s back-reference at `leader`, enforcing eligibility:
    /// an active employee of the leader's department.
    fn link_member(
        &self,
        leader: &User,
        member: UserId,
    ) -> Result<(), DirectoryError> {
        let mut member = self.target(member)?;
        if member.role != Role::Employee
            || !member.is_active
            || member.department != leader.department
        {
            return Err(DirectoryError::IneligibleTeamMember);
        }
        member.team_leader = Some(leader.id);
        self.directory.upsert_user(member)?;
        Ok(())
    }

    fn unlink_members(&self, leader: UserId) -> Result<(), DirectoryError> {
        for mut member in self.directory.team_members(leader)? {
            member.team_leader = None;
            self.directory.upsert_user(member)?;
        }
        Ok(())
    }

    /// Create an account, assign team members when the new user is a team
    /// leader, and dispatch the credentials note when an email is on file.
    pub fn create_user(&self, actor: UserId, input: NewUser) -> Result<User, DirectoryError> {
        let actor = self.actor(actor)?;
        if input.is_superuser && !actor.is_superuser {
            return Err(DirectoryError::SuperuserGuard);
        }
        if let Some(leader) = input.team_leader {
            self.check_team_leader_ref(leader)?;
        }

        let user = User {
            id: self.next_user_id()?,
            display_name: input.display_name,
            email: input.email,
            role: input.role,
            department: input.department,
            team_leader: input.team_leader,
            is_superuser: input.is_superuser,
            is_active: true,
            hired_on: input.hired_on,
        };
        self.directory.upsert_user(user.clone())?;

        if user.role == Role::TeamLeader {
            for member in input.team_members {
                self.link_member(&user, member)?;
            }
        }

        if let Some(recipient) = &user.email {
            self.notifier.notify(CredentialsNote {
                recipient: recipient.clone(),
                display_name: user.display_name.clone(),
            })?;
        }

        tracing::info!(user = user.id.0, role = user.role.label(), "user created");
        Ok(user)
    }

    /// Apply a partial update. Moving a team leader out of the role or to
    /// another department unlinks their whole team; a provided member list
    /// replaces the current assignments.
    pub fn update_user(
        &self,
        actor: UserId,
        target: UserId,
        update: UserUpdate,
    ) -> Result<User, DirectoryError> {
        let actor = self.actor(actor)?;
        let mut user = self.target(target)?;
        if user.is_superuser && !actor.is_superuser {
            return Err(DirectoryError::SuperuserGuard);
        }

        let was_team_leader = user.role == Role::TeamLeader;
        let old_department = user.department;

        if let Some(display_name) = update.display_name {
            user.display_name = display_name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(department) = update.department {
            user.department = department;
        }

        let lost_team = was_team_leader
            && (user.role != Role::TeamLeader || user.department != old_department);
        if lost_team {
            self.unlink_members(user.id)?;
        }

        self.directory.upsert_user(user.clone())?;

        if user.role == Role::TeamLeader {
            if let Some(members) = update.team_members {
                for mut current in self.directory.team_members(user.id)? {
                    if !members.contains(&current.id) {
                        current.team_leader = None;
                        self.directory.upsert_user(current)?;
                    }
                }
                for member in members {
                    self.link_member(&user, member)?;
                }
            }
        }

        tracing::info!(user = user.id.0, "user updated");
        Ok(user)
    }

    /// Soft-block or restore an account.
    pub fn set_active(
        &self,
        actor: UserId,
        target: UserId,
        active: bool,
    ) -> Result<User, DirectoryError> {
        let actor = self.actor(actor)?;
        if actor.id == target && !active {
            return Err(DirectoryError::SelfDeactivation);
        }

        let mut user = self.target(target)?;
        if user.is_superuser && !actor.is_superuser {
            return Err(DirectoryError::SuperuserGuard);
        }
        user.is_active = active;
        self.directory.upsert_user(user.clone())?;
        Ok(user)
    }

    /// Remove an account for good, unlinking any team it led.
    pub fn delete_user(&self, actor: UserId, target: UserId) -> Result<(), DirectoryError> {
        let actor = self.actor(actor)?;
        if actor.id == target {
            return Err(DirectoryError::SelfDeactivation);
        }
        let user = self.target(target)?;
        if user.is_superuser && !actor.is_superuser {
            return Err(DirectoryError::SuperuserGuard);
        }
        if user.role == Role::TeamLeader {
            self.unlink_members(user.id)?;
        }
        self.directory.delete_user(user.id)?;
        tracing::info!(user = user.id.0, "user deleted");
        Ok(())
    }

    pub fn create_department(
        &self,
        actor: UserId,
        name: String,
    ) -> Result<Department, DirectoryError> {
        self.actor(actor)?;
        let max = self
            .directory
            .departments()?
            .iter()
            .map(|department| department.id.0)
            .max()
            .unwrap_or(0);
        let department = Department {
            id: DepartmentId(max + 1),
            name,
        };
        self.directory.upsert_department(department.clone())?;
        Ok(department)
    }

    pub fn rename_department(
        &self,
        actor: UserId,
        id: DepartmentId,
        name: String,
    ) -> Result<Department, DirectoryError> {
        self.actor(actor)?;
        let mut department = self
            .directory
            .department(id)?
            .ok_or(DirectoryError::NotFound)?;
        department.name = name;
        self.directory.upsert_department(department.clone())?;
        Ok(department)
    }

    /// Delete a department; its users stay, department-less.
    pub fn delete_department(&self, actor: UserId, id: DepartmentId) -> Result<(), DirectoryError> {
        self.actor(actor)?;
        self.directory
            .department(id)?
            .ok_or(DirectoryError::NotFound)?;
        self.directory.delete_department(id)?;
        Ok(())
    }

    /// Departments with their active head counts.
    pub fn departments(&self, actor: UserId) -> Result<Vec<DepartmentOverview>, DirectoryError> {
        self.actor(actor)?;
        let mut overview = Vec::new();
        for department in self.directory.departments()? {
            let member_count = self
                .directory
                .users_in_department(department.id)?
                .iter()
                .filter(|user| user.is_active)
                .count();
            overview.push(DepartmentOverview {
                department: department.id,
                name: department.name,
                member_count,
            });
        }
        Ok(overview)
    }

    /// Every team leader with their current members.
    pub fn teams(&self, actor: UserId) -> Result<Vec<TeamOverview>, DirectoryError> {
        self.actor(actor)?;
        let mut teams = Vec::new();
        for leader in self.directory.users_with_role(Role::TeamLeader)? {
            let members = self
                .directory
                .team_members(leader.id)?
                .into_iter()
                .map(|member| member.id)
                .collect();
            teams.push(TeamOverview {
                leader: leader.id,
                leader_name: leader.display_name,
                members,
            });
        }
        Ok(teams)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::infra::{InMemoryStore, RecordingNotifier};

    const ADMIN: UserId = UserId(1);
    const LEADER: UserId = UserId(2);
    const MEMBER: UserId = UserId(3);
    const OUTSIDER: UserId = UserId(4);
    const ROOT: UserId = UserId(5);

    const ENGINEERING: DepartmentId = DepartmentId(1);
    const OPERATIONS: DepartmentId = DepartmentId(2);

    fn user(id: UserId, role: Role, department: Option<DepartmentId>) -> User {
        User {
            id,
            display_name: format!("user-{}", id.0),
            email: None,
            role,
            department,
            team_leader: None,
            is_superuser: false,
            is_active: true,
            hired_on: NaiveDate::from_ymd_opt(2022, 1, 10).expect("valid date"),
        }
    }

    fn seeded() -> (
        Arc<InMemoryStore>,
        Arc<RecordingNotifier>,
        DirectoryService<InMemoryStore, RecordingNotifier>,
    ) {
        let store = Arc::new(InMemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());

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

        store
            .upsert_user(user(ADMIN, Role::Admin, None))
            .expect("seed admin");
        store
            .upsert_user(user(LEADER, Role::TeamLeader, Some(ENGINEERING)))
            .expect("seed leader");
        let mut member = user(MEMBER, Role::Employee, Some(ENGINEERING));
        member.team_leader = Some(LEADER);
        store.upsert_user(member).expect("seed member");
        store
            .upsert_user(user(OUTSIDER, Role::Employee, Some(OPERATIONS)))
            .expect("seed outsider");
        let mut root = user(ROOT, Role::Admin, None);
        root.is_superuser = true;
        store.upsert_user(root).expect("seed superuser");

        let service = DirectoryService::new(store.clone(), notifier.clone());
        (store, notifier, service)
    }

    #[test]
    fn creation_assigns_members_and_sends_credentials() {
        let (store, notifier, service) = seeded();

        let created = service
            .create_user(
                ADMIN,
                NewUser {
                    display_name: "New Leader".to_string(),
                    email: Some("new.leader@example.com".to_string()),
                    role: Role::TeamLeader,
                    department: Some(ENGINEERING),
                    team_leader: None,
                    is_superuser: false,
                    hired_on: NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date"),
                    team_members: vec![MEMBER],
                },
            )
            .expect("creation succeeds");

        let member = store.user(MEMBER).unwrap().expect("member exists");
        assert_eq!(member.team_leader, Some(created.id));
        assert_eq!(notifier.notes().len(), 1);
        assert_eq!(notifier.notes()[0].recipient, "new.leader@example.com");
    }

    #[test]
    fn creation_rejects_members_from_other_departments() {
        let (_, _, service) = seeded();

        let result = service.create_user(
            ADMIN,
            NewUser {
                display_name: "New Leader".to_string(),
                email: None,
                role: Role::TeamLeader,
                department: Some(ENGINEERING),
                team_leader: None,
                is_superuser: false,
                hired_on: NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date"),
                team_members: vec![OUTSIDER],
            },
        );
        assert!(matches!(result, Err(DirectoryError::IneligibleTeamMember)));
    }

    #[test]
    fn non_admins_cannot_administer() {
        let (_, _, service) = seeded();

        let result = service.set_active(MEMBER, OUTSIDER, false);
        assert!(matches!(result, Err(DirectoryError::Forbidden)));
    }

    #[test]
    fn team_leader_reference_must_hold_the_role() {
        let (_, _, service) = seeded();

        let result = service.create_user(
            ADMIN,
            NewUser {
                display_name: "Hire".to_string(),
                email: None,
                role: Role::Employee,
                department: Some(ENGINEERING),
                team_leader: Some(MEMBER),
                is_superuser: false,
                hired_on: NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date"),
                team_members: Vec::new(),
            },
        );
        assert!(matches!(result, Err(DirectoryError::NotATeamLeader)));
    }

    #[test]
    fn role_change_unlinks_the_team() {
        let (store, _, service) = seeded();

        service
            .update_user(
                ADMIN,
                LEADER,
                UserUpdate {
                    role: Some(Role::Manager),
                    ..UserUpdate::default()
                },
            )
            .expect("update succeeds");

        let member = store.user(MEMBER).unwrap().expect("member exists");
        assert_eq!(member.team_leader, None);
    }

    #[test]
    fn department_change_unlinks_the_team() {
        let (store, _, service) = seeded();

        service
            .update_user(
                ADMIN,
                LEADER,
                UserUpdate {
                    department: Some(Some(OPERATIONS)),
                    ..UserUpdate::default()
                },
            )
            .expect("update succeeds");

        let member = store.user(MEMBER).unwrap().expect("member exists");
        assert_eq!(member.team_leader, None);
    }

    #[test]
    fn member_list_replacement_unlinks_the_dropped() {
        let (store, _, service) = seeded();

        let mut second = user(UserId(6), Role::Employee, Some(ENGINEERING));
        second.display_name = "second".to_string();
        store.upsert_user(second).expect("seed second employee");

        service
            .update_user(
                ADMIN,
                LEADER,
                UserUpdate {
                    team_members: Some(vec![UserId(6)]),
                    ..UserUpdate::default()
                },
            )
            .expect("update succeeds");

        assert_eq!(
            store.user(MEMBER).unwrap().expect("exists").team_leader,
            None
        );
        assert_eq!(
            store.user(UserId(6)).unwrap().expect("exists").team_leader,
            Some(LEADER)
        );
    }

    #[test]
    fn self_deactivation_is_rejected() {
        let (_, _, service) = seeded();

        let result = service.set_active(ADMIN, ADMIN, false);
        assert!(matches!(result, Err(DirectoryError::SelfDeactivation)));
    }

    #[test]
    fn only_superusers_touch_superusers() {
        let (store, _, service) = seeded();

        assert!(matches!(
            service.set_active(ADMIN, ROOT, false),
            Err(DirectoryError::SuperuserGuard)
        ));
        assert!(matches!(
            service.delete_user(ADMIN, ROOT),
            Err(DirectoryError::SuperuserGuard)
        ));

        service
            .set_active(ROOT, ADMIN, false)
            .expect("superuser may deactivate");
        assert!(!store.user(ADMIN).unwrap().expect("exists").is_active);
    }

    #[test]
    fn deleting_a_leader_unlinks_their_members() {
        let (store, _, service) = seeded();

        service.delete_user(ADMIN, LEADER).expect("delete succeeds");

        assert!(store.user(LEADER).unwrap().is_none());
        assert_eq!(
            store.user(MEMBER).unwrap().expect("exists").team_leader,
            None
        );
    }

    #[test]
    fn deleting_a_department_orphans_its_users() {
        let (store, _, service) = seeded();

        service
            .delete_department(ADMIN, OPERATIONS)
            .expect("delete succeeds");

        assert_eq!(store.user(OUTSIDER).unwrap().expect("exists").department, None);
    }

    #[test]
    fn department_overview_counts_active_members() {
        let (_, _, service) = seeded();

        service
            .set_active(ADMIN, MEMBER, false)
            .expect("deactivation succeeds");

        let overview = service.departments(ADMIN).expect("overview loads");
        let engineering = overview
            .iter()
            .find(|entry| entry.department == ENGINEERING)
            .expect("engineering listed");
        assert_eq!(engineering.member_count, 1);
    }

    #[test]
    fn teams_list_leaders_with_members() {
        let (_, _, service) = seeded();

        let teams = service.teams(ADMIN).expect("teams load");
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].leader, LEADER);
        assert_eq!(teams[0].members, vec![MEMBER]);
    }
}
