//! End-to-end account flows against the in-memory repository.

use std::sync::Arc;

use rstest::*;
use user_store::{
    DomainError, InMemoryUsersRepository, RepositoryError, TempUser, User, UsersRepository,
};

#[fixture]
fn repo() -> InMemoryUsersRepository {
    InMemoryUsersRepository::new()
}

#[fixture]
fn registration() -> TempUser {
    TempUser {
        first_name: "Nyota".to_string(),
        last_name: "Uhura".to_string(),
        email: "nyota.uhura@starfleet.example".to_string(),
        password: "hailing-frequencies".to_string(),
        confirm_password: "hailing-frequencies".to_string(),
    }
}

#[rstest]
#[tokio::test]
async fn a_registered_user_can_be_found_by_id(
    repo: InMemoryUsersRepository,
    registration: TempUser,
) {
    let mut user = User::from_temp(registration).unwrap();

    repo.create(&mut user).await.unwrap();
    let found = repo.find_by_id(user.id).await.unwrap();

    assert_eq!(found, user);
    assert_eq!(found.first_name, "Nyota");
    assert!(found.visible);
}

#[rstest]
#[tokio::test]
async fn a_registered_user_can_log_in_by_email(
    repo: InMemoryUsersRepository,
    registration: TempUser,
) {
    let email = registration.email.clone();
    let password = registration.password.clone();
    let mut user = User::from_temp(registration).unwrap();
    repo.create(&mut user).await.unwrap();

    let found = repo.find_by_email(&email).await.unwrap();

    assert!(found.authenticate(&password).is_ok());
    assert!(matches!(
        found.authenticate("wrong-password"),
        Err(DomainError::InvalidCredentials)
    ));
}

#[rstest]
#[tokio::test]
async fn a_deactivated_user_can_no_longer_log_in(
    repo: InMemoryUsersRepository,
    registration: TempUser,
) {
    let password = registration.password.clone();
    let mut user = User::from_temp(registration).unwrap();
    repo.create(&mut user).await.unwrap();

    user.visible = false;
    repo.update(&user).await.unwrap();

    let found = repo.find_by_id(user.id).await.unwrap();
    assert!(matches!(
        found.authenticate(&password),
        Err(DomainError::InactiveAccount)
    ));
}

#[rstest]
#[tokio::test]
async fn registering_the_same_email_twice_fails(
    repo: InMemoryUsersRepository,
    registration: TempUser,
) {
    let mut first = User::from_temp(registration.clone()).unwrap();
    let mut second = User::from_temp(registration).unwrap();
    repo.create(&mut first).await.unwrap();

    let err = repo.create(&mut second).await.unwrap_err();

    assert!(err.to_string().contains("Duplicate entry"));
}

#[rstest]
#[tokio::test]
async fn invalid_registration_input_is_reported_per_field(
    repo: InMemoryUsersRepository,
    mut registration: TempUser,
) {
    registration.first_name = "Ny".to_string();
    registration.email = "starfleet".to_string();
    let mut user = User::from_temp(registration).unwrap();

    let err = repo.create(&mut user).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "field validation for 'first_name' failed on the 'gte' rule\n\
         field validation for 'email' failed on the 'contains' rule"
    );
    assert_eq!(user.id, 0);
}

#[rstest]
#[case(0)]
#[case(-5)]
#[tokio::test]
async fn lookups_with_a_non_positive_id_are_rejected(
    repo: InMemoryUsersRepository,
    #[case] id: i64,
) {
    let err = repo.find_by_id(id).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::Repository(RepositoryError::InvalidArgument(_))
    ));
    assert_eq!(
        err.to_string(),
        "valid positive ID is required to find a user"
    );
}

#[rstest]
#[tokio::test]
async fn lookups_with_an_empty_email_are_rejected(repo: InMemoryUsersRepository) {
    let err = repo.find_by_email("").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "valid positive email is required to find a user"
    );
}

#[rstest]
#[tokio::test]
async fn repositories_are_usable_as_trait_objects(registration: TempUser) {
    let repo: Arc<dyn UsersRepository> = Arc::new(InMemoryUsersRepository::new());
    let mut user = User::from_temp(registration).unwrap();

    repo.create(&mut user).await.unwrap();

    assert_eq!(user.id, 1);
    assert!(repo.find_by_email(&user.email).await.is_ok());
}
