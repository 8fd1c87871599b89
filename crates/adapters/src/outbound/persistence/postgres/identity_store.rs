//! PostgreSQL identity store.

use application::dto::{NewRole, NewUser, UserUpdate};
use application::error::{IdentityError, Result};
use application::ports::outbound::IdentityStore;
use async_trait::async_trait;
use domain::identity::id::UserId;
use domain::identity::role::Role;
use domain::identity::user::User;
use sqlx::PgPool;
use sqlx::postgres::{PgDatabaseError, PgPoolOptions};

use super::models::{RoleRecord, UserRecord};
use crate::config::Postgres;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, \
                            first_name, last_name, active";

/// PostgreSQL identity store.
///
/// Uniqueness is enforced by the unique indexes on `users.username`,
/// `users.email` and `roles.name`; of two conflicting concurrent writes
/// the database lets exactly one through.
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    /// Create a new [`PgIdentityStore`] over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool from the `postgres` configuration section.
    pub async fn connect(config: &Postgres) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size.unwrap_or(5))
            .connect(&config.url())
            .await
            .map_err(IdentityError::unavailable)?;

        tracing::info!(address = %config.address, "PostgreSQL pool connected");

        Ok(Self::new(pool))
    }

    /// Create the `users` and `roles` tables if they do not exist.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                username VARCHAR(80) NOT NULL UNIQUE,
                email VARCHAR(254) NOT NULL UNIQUE,
                password_hash VARCHAR(255),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                first_name VARCHAR(100),
                last_name VARCHAR(100),
                active BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS roles (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(80) NOT NULL UNIQUE,
                user_id BIGINT REFERENCES users (id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn create_user(&self, new: NewUser) -> Result<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(new.username.as_str())
        .bind(new.email.as_str())
        .bind(new.password_hash.as_ref().map(|h| h.as_str()))
        .bind(new.first_name.as_deref())
        .bind(new.last_name.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        record.try_into_user()
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1",
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        record.map(UserRecord::try_into_user).transpose()
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1",
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        record.map(UserRecord::try_into_user).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1",
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        record.map(UserRecord::try_into_user).transpose()
    }

    async fn update_user(
        &self,
        id: UserId,
        changes: UserUpdate,
    ) -> Result<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            UPDATE users
            SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                first_name = COALESCE($5, first_name),
                last_name = COALESCE($6, last_name),
                active = COALESCE($7, active)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(id.as_i64())
        .bind(changes.username.as_ref().map(|u| u.as_str()))
        .bind(changes.email.as_ref().map(|e| e.as_str()))
        .bind(changes.password_hash.as_ref().map(|h| h.as_str()))
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        record.ok_or(IdentityError::NotFound)?.try_into_user()
    }

    async fn create_role(&self, new: NewRole) -> Result<Role> {
        let record = sqlx::query_as::<_, RoleRecord>(
            r#"
            INSERT INTO roles (name, user_id)
            VALUES ($1, $2)
            RETURNING id, name, user_id
            "#,
        )
        .bind(new.name.as_str())
        .bind(new.user_id.map(|id| id.as_i64()))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        record.try_into_role()
    }

    async fn list_roles_for_user(&self, user_id: UserId) -> Result<Vec<Role>> {
        let records = sqlx::query_as::<_, RoleRecord>(
            r#"
            SELECT id, name, user_id
            FROM roles
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        records
            .into_iter()
            .map(RoleRecord::try_into_role)
            .collect()
    }
}

/// Translate driver errors into the application taxonomy.
fn map_sqlx_error(err: sqlx::Error) -> IdentityError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(pg) = db_err.try_downcast_ref::<PgDatabaseError>() {
            // unique_violation
            if pg.code() == "23505" {
                return IdentityError::DuplicateKey {
                    field: duplicate_field(pg.constraint()),
                };
            }
            // foreign_key_violation: a dangling reference behaves like
            // the referenced record being absent.
            if pg.code() == "23503" {
                return IdentityError::NotFound;
            }
        }
    }

    match err {
        sqlx::Error::RowNotFound => IdentityError::NotFound,
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => IdentityError::unavailable(err),
        other => IdentityError::Internal(Box::new(other)),
    }
}

fn duplicate_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("username") => "username",
        Some(name) if name.contains("email") => "email",
        Some(name) if name.starts_with("roles") => "name",
        _ => "key",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_field_mapping() {
        assert_eq!(duplicate_field(Some("users_username_key")), "username");
        assert_eq!(duplicate_field(Some("users_email_key")), "email");
        assert_eq!(duplicate_field(Some("roles_name_key")), "name");
        assert_eq!(duplicate_field(None), "key");
    }
}
