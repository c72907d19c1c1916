use std::fmt;

use thiserror::Error;

/// A single failed field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub rule: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field validation for '{}' failed on the '{}' rule",
            self.field, self.rule
        )
    }
}

/// Every violation found on one entity, in field declaration order.
///
/// Displays one violation per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolations(Vec<Violation>);

impl FieldViolations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }
}

impl fmt::Display for FieldViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut violations = self.0.iter();
        if let Some(first) = violations.next() {
            write!(f, "{first}")?;
            for violation in violations {
                write!(f, "\n{violation}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no entity provided for validation")]
    NilEntity,

    #[error("{0}")]
    Validation(FieldViolations),

    #[error("password confirmation does not match")]
    PasswordMismatch,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("user is inactive")]
    InactiveAccount,

    #[error("invalid credentials")]
    InvalidCredentials,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    InvalidArgument(&'static str),

    #[error("unable to find user")]
    NotFound,

    #[error("{0}")]
    Database(String),
}
