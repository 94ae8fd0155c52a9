use crate::auth::password::{self, PasswordError};
use crate::entities::user;
use sea_orm::*;

pub mod web;

pub use web::create_user_router;

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct User {
    id: i32,
    username: String,
    name: String,
    department: String,
    password_hash: String,
}

impl User {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> &str {
        &self.department
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            name: model.name,
            department: model.department,
            password_hash: model.password_hash,
        }
    }
}

/// Fields collected by the registration form.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub department: String,
    pub password: String,
}

/// Error type for UserService operations.
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),
    #[error("User with ID {0} not found")]
    UserNotFound(i32),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    #[error(transparent)]
    Password(#[from] PasswordError),
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl UserService<'_> {
    pub fn new(db: &DatabaseConnection) -> UserService<'_> {
        UserService { db }
    }

    /// Registers a user. Username, name and department are stored lowercase
    /// and the password only as a salted hash.
    #[tracing::instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, UserServiceError> {
        let username = new_user.username.to_lowercase();
        if self.find_by_username(&username).await?.is_some() {
            return Err(UserServiceError::DuplicateUsername(username));
        }

        let active_model = user::ActiveModel {
            username: ActiveValue::Set(username.clone()),
            name: ActiveValue::Set(new_user.name.to_lowercase()),
            department: ActiveValue::Set(new_user.department.to_lowercase()),
            password_hash: ActiveValue::Set(password::hash_password(&new_user.password)?),
            ..Default::default()
        };

        match active_model.insert(self.db).await {
            Ok(created_model) => Ok(User::from(created_model)),
            // Lost a race against a concurrent registration of the same name.
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(UserServiceError::DuplicateUsername(username))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Looks a user up by username, case-insensitively.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserServiceError> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username.to_lowercase()))
            .one(self.db)
            .await?;
        Ok(model.map(User::from))
    }

    /// Returns the user when the credentials match. An unknown username and a
    /// wrong password are indistinguishable to the caller.
    #[tracing::instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, UserServiceError> {
        let user = self
            .find_by_username(username)
            .await?
            .filter(|user| password::verify_password(password, &user.password_hash));
        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all_users(&self) -> Result<Vec<User>, UserServiceError> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::Username)
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from)
            .collect();
        Ok(users)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_user_by_id(&self, id: i32) -> Result<User, UserServiceError> {
        let model = user::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(UserServiceError::UserNotFound(id))?;
        Ok(User::from(model))
    }

    /// Overwrites a user's display name and department.
    #[tracing::instrument(skip(self))]
    pub async fn update_user_details(
        &self,
        id: i32,
        name: String,
        department: String,
    ) -> Result<User, UserServiceError> {
        let user_to_update = user::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(UserServiceError::UserNotFound(id))?;

        let mut active_model: user::ActiveModel = user_to_update.into();
        active_model.name = ActiveValue::Set(name);
        active_model.department = ActiveValue::Set(department);
        let updated_model = active_model.update(self.db).await?;

        Ok(User::from(updated_model))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_user_by_id(&self, id: i32) -> Result<User, UserServiceError> {
        let user_to_delete = user::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(UserServiceError::UserNotFound(id))?;

        let deleted = User::from(user_to_delete);
        user::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(deleted)
    }
}
