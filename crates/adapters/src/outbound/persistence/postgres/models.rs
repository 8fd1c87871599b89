//! Database models for PostgreSQL.

use application::error::{Result, ToInternal};
use chrono::{DateTime, Utc};
use domain::auth::password::PasswordHash;
use domain::identity::email::EmailAddress;
use domain::identity::id::{RoleId, UserId};
use domain::identity::role::{Role, RoleName};
use domain::identity::user::User;
use domain::identity::username::Username;
use sqlx::FromRow;

/// User record as stored in the database.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub active: bool,
}

impl UserRecord {
    /// Convert to the domain entity.
    ///
    /// A row that fails the domain invariants is reported as an internal
    /// error: it cannot have been written through this store.
    pub fn try_into_user(self) -> Result<User> {
        Ok(User {
            id: UserId::from(self.id),
            username: Username::parse(self.username).catch()?,
            email: EmailAddress::parse(self.email).catch()?,
            password_hash: self
                .password_hash
                .map(PasswordHash::parse)
                .transpose()
                .catch()?,
            created_at: self.created_at,
            first_name: self.first_name,
            last_name: self.last_name,
            active: self.active,
        })
    }
}

/// Role record as stored in the database.
#[derive(Debug, Clone, FromRow)]
pub struct RoleRecord {
    pub id: i64,
    pub name: String,
    pub user_id: Option<i64>,
}

impl RoleRecord {
    /// Convert to the domain entity.
    pub fn try_into_role(self) -> Result<Role> {
        Ok(Role {
            id: RoleId::from(self.id),
            name: RoleName::parse(self.name).catch()?,
            user_id: self.user_id.map(UserId::from),
        })
    }
}
