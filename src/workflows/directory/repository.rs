use super::domain::{Department, DepartmentId, Role, User, UserId};

/// Error enumeration shared by the storage seams.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Identity-provider seam: user and department lookups plus the writes the
/// directory workflow needs. Implementations own ordering guarantees noted on
/// each method.
pub trait DirectoryRepository: Send + Sync {
    fn user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
    fn department(&self, id: DepartmentId) -> Result<Option<Department>, RepositoryError>;
    fn departments(&self) -> Result<Vec<Department>, RepositoryError>;
    /// All users, active or not, in no particular order.
    fn users(&self) -> Result<Vec<User>, RepositoryError>;
    fn users_in_department(&self, id: DepartmentId) -> Result<Vec<User>, RepositoryError>;
    fn users_with_role(&self, role: Role) -> Result<Vec<User>, RepositoryError>;
    /// Active users whose `team_leader` back-reference points at `leader`.
    fn team_members(&self, leader: UserId) -> Result<Vec<User>, RepositoryError>;
    fn upsert_user(&self, user: User) -> Result<(), RepositoryError>;
    fn upsert_department(&self, department: Department) -> Result<(), RepositoryError>;
    fn delete_user(&self, id: UserId) -> Result<(), RepositoryError>;
    /// Removes the department and clears the `department` field of its users.
    fn delete_department(&self, id: DepartmentId) -> Result<(), RepositoryError>;
}
