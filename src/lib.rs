//! Data-access layer for user accounts.
//!
//! Provides the [`User`] entity with password hashing and declarative field
//! validation, plus the async [`UsersRepository`] contract with a MySQL
//! implementation and an in-memory one for tests and local development.

pub mod domain;
pub mod infrastructure;

pub use domain::error::{DomainError, FieldViolations, RepositoryError, Violation};
pub use domain::models::user::{TempUser, User, validate};
pub use domain::repositories::users_repository::{InMemoryUsersRepository, UsersRepository};
pub use domain::services::password;
pub use infrastructure::database::{DatabaseConfig, connect};
pub use infrastructure::mysql_users_repository::MySqlUsersRepository;
