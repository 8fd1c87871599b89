//! Data Transfer Objects for the application layer.
//!
//! DTOs carry validated values between the service and the store port
//! without exposing partially-built domain entities.

use domain::auth::password::PasswordHash;
use domain::identity::email::EmailAddress;
use domain::identity::id::UserId;
use domain::identity::role::RoleName;
use domain::identity::username::Username;

/// Request DTO for user registration.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Unique display name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Plaintext password; `None` leaves the account without a usable
    /// credential (pending external linkage).
    pub password: Option<String>,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
}

/// A fully validated user, ready for insertion.
///
/// The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: Option<PasswordHash>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Patch applied by [`IdentityStore::update_user`].
///
/// `None` fields are left unchanged; the store applies the whole patch
/// atomically.
///
/// [`IdentityStore::update_user`]: crate::ports::outbound::IdentityStore::update_user
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password_hash: Option<PasswordHash>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub active: Option<bool>,
}

/// A validated role, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: RoleName,
    pub user_id: Option<UserId>,
}
