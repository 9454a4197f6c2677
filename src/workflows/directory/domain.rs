use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for directory users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Identifier wrapper for departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DepartmentId(pub u64);

/// Roles recognized across the review workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Manager,
    TeamLeader,
    Hr,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::TeamLeader => "team_leader",
            Role::Hr => "hr",
            Role::Admin => "admin",
        }
    }

    /// Roles that appear on review rosters (HR and admins review, they are not reviewed).
    pub const fn is_reviewable(self) -> bool {
        matches!(self, Role::Employee | Role::Manager | Role::TeamLeader)
    }
}

/// A directory user with the relations the access rules depend on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub email: Option<String>,
    pub role: Role,
    pub department: Option<DepartmentId>,
    /// Back-reference to the team leader this user reports to. Must point at a
    /// user whose role is `TeamLeader`; the directory service enforces this on
    /// every write.
    pub team_leader: Option<UserId>,
    pub is_superuser: bool,
    pub is_active: bool,
    /// Surveys created before this date are never offered to the user.
    pub hired_on: NaiveDate,
}

impl User {
    pub const fn is_privileged(&self) -> bool {
        matches!(self.role, Role::Hr | Role::Admin) || self.is_superuser
    }

    pub const fn is_directory_admin(&self) -> bool {
        matches!(self.role, Role::Admin) || self.is_superuser
    }
}

/// Named grouping that surveys, questions, and users attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}
