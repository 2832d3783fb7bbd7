//! Registered user repository

use crate::domain::{NewUser, RegisteredUser, Role, UpdateProfileInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<RegisteredUser>;
    async fn find_by_id(&self, id: i64) -> Result<Option<RegisteredUser>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<RegisteredUser>>;
    async fn list_by_roles(&self, roles: &[Role]) -> Result<Vec<RegisteredUser>>;
    async fn search_by_surname(&self, fragment: &str, roles: &[Role])
        -> Result<Vec<RegisteredUser>>;
    async fn search_by_email(&self, fragment: &str, roles: &[Role]) -> Result<Vec<RegisteredUser>>;
    async fn update_profile(&self, id: i64, input: &UpdateProfileInput) -> Result<RegisteredUser>;
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<()>;
    async fn update_role(&self, id: i64, role: Role) -> Result<()>;
}

const USER_COLUMNS: &str = r#"
    SELECT id, firstname, surname, phone, email, password_hash, role,
           state, town, street, street_number, post_code, created_at
    FROM users
"#;

pub struct UserRepositoryImpl {
    pool: MySqlPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Users with one of `roles`, optionally narrowed by a LIKE on `column`
    async fn select_by_roles(
        &self,
        roles: &[Role],
        like: Option<(&str, &str)>,
    ) -> Result<Vec<RegisteredUser>> {
        if roles.is_empty() {
            return Ok(vec![]);
        }

        let mut qb: QueryBuilder<MySql> = QueryBuilder::new(USER_COLUMNS);
        qb.push(" WHERE role IN (");
        let mut list = qb.separated(", ");
        for role in roles {
            list.push_bind(role.as_str());
        }
        qb.push(")");

        if let Some((column, fragment)) = like {
            qb.push(format!(" AND {} LIKE ", column))
                .push_bind(format!("%{}%", fragment));
        }
        qb.push(" ORDER BY surname, firstname, id");

        let users = qb
            .build_query_as::<RegisteredUser>()
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, user: &NewUser) -> Result<RegisteredUser> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (firstname, surname, phone, email, password_hash, role, created_at)
            VALUES (?, ?, ?, ?, ?, ?, NOW())
            "#,
        )
        .bind(&user.firstname)
        .bind(&user.surname)
        .bind(&user.phone)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create user")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<RegisteredUser>> {
        let user = sqlx::query_as::<_, RegisteredUser>(&format!("{} WHERE id = ?", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<RegisteredUser>> {
        let user =
            sqlx::query_as::<_, RegisteredUser>(&format!("{} WHERE email = ?", USER_COLUMNS))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    async fn list_by_roles(&self, roles: &[Role]) -> Result<Vec<RegisteredUser>> {
        self.select_by_roles(roles, None).await
    }

    async fn search_by_surname(
        &self,
        fragment: &str,
        roles: &[Role],
    ) -> Result<Vec<RegisteredUser>> {
        self.select_by_roles(roles, Some(("surname", fragment))).await
    }

    async fn search_by_email(&self, fragment: &str, roles: &[Role]) -> Result<Vec<RegisteredUser>> {
        self.select_by_roles(roles, Some(("email", fragment))).await
    }

    async fn update_profile(&self, id: i64, input: &UpdateProfileInput) -> Result<RegisteredUser> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        let address = input.address.clone().unwrap_or_else(|| existing.address());

        sqlx::query(
            r#"
            UPDATE users
            SET firstname = ?, surname = ?, phone = ?, email = ?,
                state = ?, town = ?, street = ?, street_number = ?, post_code = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.firstname)
        .bind(&input.surname)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&address.state)
        .bind(&address.town)
        .bind(&address.street)
        .bind(&address.street_number)
        .bind(&address.post_code)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<()> {
        sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_role(&self, id: i64, role: Role) -> Result<()> {
        sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
