//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::UserId;
use quickdesk_entity::user::{CreateUser, UpdateUser, User, UserRole};

use super::{db_error, to_count, unique_error};
use crate::repositories::UserRepository;

const EMAIL_TAKEN: &str = "Email already exists";

/// PostgreSQL-backed user repository.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by id"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by email"))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to find users by id"))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list users"))
    }

    async fn find_by_roles(&self, roles: &[UserRole]) -> AppResult<Vec<User>> {
        let roles: Vec<String> = roles.iter().map(|r| r.as_str().to_string()).collect();
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role::text = ANY($1) ORDER BY name ASC",
        )
        .bind(&roles)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list users by role"))
    }

    async fn find_recent(&self, limit: u64) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC LIMIT $1")
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list recent users"))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, language,
                               categories_of_interest, created_at, updated_at)
            VALUES ($1, $2, LOWER($3), $4, $5, $6, $7, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(&data.language)
        .bind(&data.categories_of_interest)
        .fetch_one(&self.pool)
        .await
        .map_err(unique_error("Failed to create user", EMAIL_TAKEN))
    }

    async fn update(&self, id: UserId, data: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE(LOWER($3), email),
                role = COALESCE($4, role),
                language = COALESCE($5, language),
                categories_of_interest = COALESCE($6, categories_of_interest),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.role)
        .bind(&data.language)
        .bind(&data.categories_of_interest)
        .fetch_optional(&self.pool)
        .await
        .map_err(unique_error("Failed to update user", EMAIL_TAKEN))
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(db_error("Failed to update password"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete user"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[UserId]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to bulk delete users"))?;
        Ok(result.rows_affected())
    }

    async fn set_role_many(&self, ids: &[UserId], role: UserRole) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = ANY($1) AND role <> $2",
        )
        .bind(ids)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to bulk change roles"))?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> AppResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map(to_count)
            .map_err(db_error("Failed to count users"))
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .map(to_count)
            .map_err(db_error("Failed to count users by role"))
    }
}
