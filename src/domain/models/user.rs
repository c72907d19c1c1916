use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::error::{DomainError, FieldViolations, Violation};
use crate::domain::services::password;

const NAME_MIN_CHARS: usize = 4;
const PASSWORD_MIN_CHARS: usize = 8;

/// Field declaration order for violation reporting. `validator` collects
/// errors into a hash map, so the aggregate is rebuilt against this list.
const FIELD_ORDER: [&str; 5] = [
    "first_name",
    "last_name",
    "email",
    "password",
    "confirm_password",
];

/// Registration input as supplied by a caller, plaintext passwords included.
///
/// Deserializable for the untrusted-input path; deliberately not
/// serializable, so plaintext never travels outward.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TempUser {
    #[validate(custom(function = "validate_name"))]
    pub first_name: String,
    #[validate(custom(function = "validate_name"))]
    pub last_name: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(custom(function = "validate_plain_password"))]
    pub password: String,
    #[validate(custom(function = "validate_plain_password"))]
    pub confirm_password: String,
}

/// A user account as persisted in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct User {
    /// Primary key, zero until the entity is stored.
    pub id: i64,
    #[validate(custom(function = "validate_name"))]
    pub first_name: String,
    #[validate(custom(function = "validate_name"))]
    pub last_name: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    /// Argon2 hash in PHC form, never the plaintext.
    #[serde(skip_serializing)]
    #[validate(custom(function = "validate_required"))]
    pub password: String,
    /// Active-account flag; inactive users cannot authenticate.
    pub visible: bool,
}

impl User {
    /// Build a new account from registration input.
    ///
    /// Checks the password confirmation, hashes the password and marks the
    /// account active. Field-level validation is left to the repository.
    pub fn from_temp(temp: TempUser) -> Result<Self, DomainError> {
        if temp.password != temp.confirm_password {
            return Err(DomainError::PasswordMismatch);
        }

        let mut user = Self {
            id: 0,
            first_name: temp.first_name,
            last_name: temp.last_name,
            email: temp.email,
            password: String::new(),
            visible: true,
        };
        user.set_password(&temp.password)?;

        Ok(user)
    }

    /// Replace the stored hash with a fresh hash of `plain_password`.
    pub fn set_password(&mut self, plain_password: &str) -> Result<(), DomainError> {
        self.password = password::hash(plain_password)?;
        Ok(())
    }

    /// Check `plain_password` against the stored hash.
    ///
    /// Inactive accounts never authenticate. A hash that fails to parse
    /// counts as a failed login, not a pass.
    pub fn authenticate(&self, plain_password: &str) -> Result<(), DomainError> {
        if !self.visible {
            return Err(DomainError::InactiveAccount);
        }

        match password::verify(plain_password, &self.password) {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(DomainError::InvalidCredentials),
        }
    }
}

/// Validate an entity's fields, aggregating every violation in field
/// declaration order.
///
/// `None` stands in for an absent entity and fails with
/// [`DomainError::NilEntity`].
pub fn validate<T: Validate>(entity: Option<&T>) -> Result<(), DomainError> {
    let entity = entity.ok_or(DomainError::NilEntity)?;
    entity
        .validate()
        .map_err(|errors| DomainError::Validation(collect_violations(errors)))
}

fn collect_violations(errors: ValidationErrors) -> FieldViolations {
    let field_errors = errors.field_errors();
    let mut violations = Vec::new();
    for field in FIELD_ORDER {
        if let Some(failures) = field_errors.get(field) {
            for failure in failures.iter() {
                violations.push(Violation {
                    field,
                    rule: failure.code.to_string(),
                });
            }
        }
    }
    FieldViolations::new(violations)
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    if value.chars().count() < NAME_MIN_CHARS {
        return Err(ValidationError::new("gte"));
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    if !value.contains('@') {
        return Err(ValidationError::new("contains"));
    }
    Ok(())
}

fn validate_plain_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    if value.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::new("gte"));
    }
    Ok(())
}

// The stored password is a hash; its length is an algorithm artifact, so
// only presence is checked.
fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}
