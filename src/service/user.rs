//! Account, session and profile business logic

use crate::domain::{
    Address, ChangePasswordInput, LoginInput, NewUser, RegisterInput, RegisteredUser, Role,
    SetPasswordInput, TokenResponse, UpdateProfileInput, UserOverview,
};
use crate::error::{AppError, Result};
use crate::jwt::JwtManager;
use crate::repository::UserRepository;
use crate::service::password::{hash_password, verify_password};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

pub struct UserService<U: UserRepository> {
    repo: Arc<U>,
    jwt_manager: JwtManager,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(repo: Arc<U>, jwt_manager: JwtManager) -> Self {
        Self { repo, jwt_manager }
    }

    // ==================== Sessions ====================

    pub async fn register(&self, input: RegisterInput) -> Result<RegisteredUser> {
        input.validate()?;

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let new_user = NewUser {
            password_hash: hash_password(&input.password)?,
            firstname: input.firstname,
            surname: input.surname,
            phone: input.phone,
            email: input.email,
            role: Role::User,
        };

        let user = self.repo.create(&new_user).await?;
        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    pub async fn login(&self, input: LoginInput) -> Result<TokenResponse> {
        input.validate()?;

        let Some(user) = self.repo.find_by_email(&input.email).await? else {
            warn!("Login rejected: unknown user");
            return Err(AppError::BadRequest("Unknown user!".to_string()));
        };

        if !verify_password(&input.password, &user.password_hash)? {
            warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(AppError::BadRequest("Wrong password!".to_string()));
        }

        self.issue_token(&user)
    }

    pub fn issue_token(&self, user: &RegisteredUser) -> Result<TokenResponse> {
        let token = self
            .jwt_manager
            .create_session_token(&user.email, user.role)?;

        Ok(TokenResponse {
            token,
            role: user.role,
            expires_in: self.jwt_manager.ttl_secs(),
        })
    }

    /// Resolve a bearer token to the stored user; `None` for bad tokens or unknown users
    pub async fn authenticate(&self, token: &str) -> Result<Option<RegisteredUser>> {
        let Ok(claims) = self.jwt_manager.verify_session_token(token) else {
            return Ok(None);
        };
        self.repo.find_by_email(&claims.sub).await
    }

    // ==================== Profiles ====================

    pub async fn get(&self, id: i64) -> Result<RegisteredUser> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn update_profile(&self, id: i64, input: UpdateProfileInput) -> Result<RegisteredUser> {
        input.validate()?;
        let existing = self.get(id).await?;

        if !existing.email.eq_ignore_ascii_case(&input.email) {
            if let Some(other) = self.repo.find_by_email(&input.email).await? {
                if other.id != id {
                    return Err(AppError::Conflict(
                        "User with this email already exists".to_string(),
                    ));
                }
            }
        }

        self.repo.update_profile(id, &input).await
    }

    /// Owner password change; requires the current password
    pub async fn change_password(&self, id: i64, input: ChangePasswordInput) -> Result<()> {
        input.validate()?;
        let user = self.get(id).await?;

        if !verify_password(&input.old_password, &user.password_hash)? {
            return Err(AppError::Forbidden("Wrong password!".to_string()));
        }

        self.repo
            .update_password(id, &hash_password(&input.password)?)
            .await?;
        info!(user_id = id, "Password changed");
        Ok(())
    }

    /// Admin password reset
    pub async fn set_password(&self, id: i64, input: SetPasswordInput) -> Result<()> {
        input.validate()?;
        let _ = self.get(id).await?;

        self.repo
            .update_password(id, &hash_password(&input.password)?)
            .await?;
        info!(user_id = id, "Password reset by admin");
        Ok(())
    }

    pub async fn address(&self, id: i64) -> Result<Address> {
        Ok(self.get(id).await?.address())
    }

    pub async fn address_by_email(&self, email: &str) -> Result<Address> {
        self.repo
            .find_by_email(email)
            .await?
            .map(|user| user.address())
            .ok_or_else(|| AppError::BadRequest("Unknown user!".to_string()))
    }

    // ==================== Roles ====================

    /// Returns the confirmation message, e.g. "jan@example.com is now an employee"
    pub async fn set_role(&self, role: &str, email: &str) -> Result<String> {
        let role: Role = role
            .parse()
            .map_err(|_| AppError::BadRequest("Unknown role!".to_string()))?;

        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::BadRequest("Unknown user!".to_string()))?;

        self.repo.update_role(user.id, role).await?;
        info!(user_id = user.id, role = %role, "Role changed");

        Ok(format!("{} is now {}", user.email, role.with_article()))
    }

    pub async fn list_employees(&self) -> Result<Vec<UserOverview>> {
        Ok(overviews(self.repo.list_by_roles(Role::STAFF).await?))
    }

    pub async fn employees_by_surname(&self, name: &str) -> Result<Vec<UserOverview>> {
        Ok(overviews(
            self.repo.search_by_surname(name, Role::STAFF).await?,
        ))
    }

    pub async fn users_by_surname(&self, name: &str) -> Result<Vec<UserOverview>> {
        Ok(overviews(
            self.repo.search_by_surname(name, &[Role::User]).await?,
        ))
    }

    pub async fn employees_by_email(&self, email: &str) -> Result<Vec<UserOverview>> {
        Ok(overviews(self.repo.search_by_email(email, Role::STAFF).await?))
    }

    pub async fn users_by_email(&self, email: &str) -> Result<Vec<UserOverview>> {
        Ok(overviews(
            self.repo.search_by_email(email, &[Role::User]).await?,
        ))
    }
}

fn overviews(users: Vec<RegisteredUser>) -> Vec<UserOverview> {
    users.iter().map(UserOverview::from).collect()
}
