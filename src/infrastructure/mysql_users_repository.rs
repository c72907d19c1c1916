use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::domain::{
    error::{DomainError, RepositoryError},
    models::user::{User, validate},
    repositories::users_repository::{UsersRepository, check_email, check_id},
};
use crate::infrastructure::entity::users;

/// MySQL-backed [`UsersRepository`] on top of a SeaORM connection pool.
pub struct MySqlUsersRepository {
    db: DatabaseConnection,
}

impl MySqlUsersRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            password: model.password,
            visible: model.visible,
        }
    }
}

#[async_trait]
impl UsersRepository for MySqlUsersRepository {
    async fn create(&self, user: &mut User) -> Result<(), DomainError> {
        validate(Some(&*user))?;

        let model = users::ActiveModel {
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            email: Set(user.email.clone()),
            password: Set(user.password.clone()),
            visible: Set(user.visible),
            ..Default::default()
        };
        let insert_result = users::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        user.id = insert_result.last_insert_id;

        tracing::info!(user_id = user.id, "created user");
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<User, DomainError> {
        check_id(id)?;

        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        check_email(email)?;

        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        Ok(model.into())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        validate(Some(user))?;

        let model = users::ActiveModel {
            id: Set(user.id),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            email: Set(user.email.clone()),
            password: Set(user.password.clone()),
            visible: Set(user.visible),
        };
        users::Entity::update(model)
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepositoryError::NotFound,
                other => RepositoryError::Database(other.to_string()),
            })?;

        tracing::info!(user_id = user.id, "updated user");
        Ok(())
    }
}
