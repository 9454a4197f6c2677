//! Users, departments, and team assignment: the identity side the review
//! workflows lean on.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{Department, DepartmentId, Role, User, UserId};
pub use repository::{DirectoryRepository, RepositoryError};
pub use service::{
    CredentialsNote, CredentialsNotifier, DepartmentOverview, DirectoryError, DirectoryService,
    NewUser, NotificationError, TeamOverview, UserUpdate,
};
