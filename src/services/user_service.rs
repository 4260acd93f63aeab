use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::password::{hash_password, verify_password},
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{
            request::{LoginRequest, RegisterRequest},
            response::UserDto,
        },
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserDto> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                email
            )));
        }

        let hashed_password = hash_password(&request.password)?;
        let user = self.repository.create(User::new(&email, hashed_password)).await?;

        log::info!("Registered user '{}'", user.id);
        Ok(user.into())
    }

    /// Verifies credentials. Unknown email and wrong password are indistinguishable.
    pub async fn authenticate(&self, request: LoginRequest) -> AppResult<User> {
        request.validate()?;

        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let user = self
            .repository
            .find_by_email(&request.email.trim().to_lowercase())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&request.password, &user.hashed_password)? {
            return Err(invalid());
        }
        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))
    }
}
