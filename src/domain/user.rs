//! Registered user domain model

use super::order::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User role gating endpoint access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Employee,
    Admin,
}

impl Role {
    pub const ALL: &'static [Role] = &[Role::User, Role::Employee, Role::Admin];
    pub const STAFF: &'static [Role] = &[Role::Employee, Role::Admin];
    pub const ADMIN: &'static [Role] = &[Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Employee => "employee",
            Role::Admin => "admin",
        }
    }

    pub fn is_staff(&self) -> bool {
        Self::STAFF.contains(self)
    }

    /// "a user", "an employee", "an admin"
    pub fn with_article(&self) -> String {
        match self {
            Role::User => "a user".to_string(),
            Role::Employee => "an employee".to_string(),
            Role::Admin => "an admin".to_string(),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "employee" => Ok(Role::Employee),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for Role {
    fn decode(value: sqlx::mysql::MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl sqlx::Type<sqlx::MySql> for Role {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for Role {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <&str as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.as_str(), buf)
    }
}

/// Registered user entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RegisteredUser {
    pub id: i64,
    pub firstname: String,
    pub surname: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub state: Option<String>,
    pub town: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub post_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RegisteredUser {
    pub fn address(&self) -> Address {
        Address {
            state: self.state.clone(),
            town: self.town.clone(),
            street: self.street.clone(),
            street_number: self.street_number.clone(),
            post_code: self.post_code.clone(),
        }
    }
}

/// The authenticated caller on whose behalf a change is made
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub user_id: i64,
    pub email: String,
    pub firstname: String,
    pub surname: String,
    pub role: Role,
}

impl From<&RegisteredUser> for Actor {
    fn from(user: &RegisteredUser) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            firstname: user.firstname.clone(),
            surname: user.surname.clone(),
            role: user.role,
        }
    }
}

/// Short user listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserOverview {
    pub id: i64,
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub role: Role,
}

impl From<&RegisteredUser> for UserOverview {
    fn from(user: &RegisteredUser) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Full profile as shown to its owner or an admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub firstname: String,
    pub surname: String,
    pub phone: String,
    pub email: String,
    pub role: Role,
    pub address: Address,
}

impl From<&RegisteredUser> for UserProfile {
    fn from(user: &RegisteredUser) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname.clone(),
            surname: user.surname.clone(),
            phone: user.phone.clone(),
            email: user.email.clone(),
            role: user.role,
            address: user.address(),
        }
    }
}

/// Registration request
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 255))]
    pub firstname: String,
    #[validate(length(min = 1, max = 255))]
    pub surname: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// User row ready to be persisted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub firstname: String,
    pub surname: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct LoginInput {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Session token issued on login or renewal
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub role: Role,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Profile update; `address` is left untouched when absent
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 255))]
    pub firstname: String,
    #[validate(length(min = 1, max = 255))]
    pub surname: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(nested)]
    pub address: Option<Address>,
}

/// Password change by the account owner
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ChangePasswordInput {
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    pub old_password: String,
}

/// Password reset by an admin
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct SetPasswordInput {
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Body of `POST /setRole/{role}`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RoleRequest {
    pub email: String,
}
