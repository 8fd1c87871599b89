//! Identity service orchestrating registration, authentication and
//! role assignment through the outbound ports.

use domain::auth::password::Password;
use domain::error::DomainError;
use domain::identity::email::EmailAddress;
use domain::identity::id::UserId;
use domain::identity::role::{Role, RoleName};
use domain::identity::user::User;
use domain::identity::username::Username;

use crate::dto::{NewRole, NewUser, RegisterRequest, UserUpdate};
use crate::error::{IdentityError, Result};
use crate::ports::outbound::{IdentityStore, PasswordHasher};

/// Maximum length of the optional profile names, in bytes.
const NAME_MAX_LENGTH: usize = 100;

/// Identity manager.
///
/// Owns no state beyond its injected ports; construct once at startup
/// and share freely between callers.
pub struct IdentityService {
    store: Box<dyn IdentityStore>,
    hasher: Box<dyn PasswordHasher>,
}

impl IdentityService {
    /// Create a new [`IdentityService`].
    pub fn new(
        store: Box<dyn IdentityStore>,
        hasher: Box<dyn PasswordHasher>,
    ) -> Self {
        Self { store, hasher }
    }

    /// Register a new user.
    ///
    /// Validates the request, hashes the optional password and delegates
    /// insertion to the store. `DuplicateKey` propagates on username or
    /// email collision; nothing is partially applied.
    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        let username = Username::parse(request.username)?;
        let email = EmailAddress::parse(request.email)?;
        validate_name("first_name", request.first_name.as_deref())?;
        validate_name("last_name", request.last_name.as_deref())?;

        let password_hash = match request.password {
            Some(plaintext) => {
                Some(self.hasher.hash(&Password::new(plaintext)?)?)
            },
            None => None,
        };

        let user = self
            .store
            .create_user(NewUser {
                username,
                email,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
            })
            .await?;

        tracing::info!(user_id = %user.id, "user registered");

        Ok(user)
    }

    /// Authenticate by username or email.
    ///
    /// The username is tried first, then the normalized email. An unknown
    /// identifier, an account without a usable password and a mismatching
    /// password all collapse into the same [`IdentityError::AuthFailure`],
    /// so the caller cannot enumerate accounts. The discriminating reason
    /// is only logged.
    pub async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<User> {
        let Ok(candidate) = Password::new(password) else {
            tracing::debug!("authentication failed: unusable candidate");
            return Err(IdentityError::AuthFailure);
        };

        let mut user =
            self.store.find_user_by_username(identifier).await?;
        if user.is_none() {
            if let Ok(email) = EmailAddress::parse(identifier) {
                user =
                    self.store.find_user_by_email(email.as_str()).await?;
            }
        }

        let Some(user) = user else {
            tracing::debug!("authentication failed: unknown identifier");
            return Err(IdentityError::AuthFailure);
        };

        let Some(hash) = user.password_hash.as_ref() else {
            tracing::debug!(user_id = %user.id, "authentication failed: no password set");
            return Err(IdentityError::AuthFailure);
        };

        if !self.hasher.verify(&candidate, hash) {
            tracing::debug!(user_id = %user.id, "authentication failed: password mismatch");
            return Err(IdentityError::AuthFailure);
        }

        Ok(user)
    }

    /// Replace a user's password.
    pub async fn set_password(
        &self,
        user_id: UserId,
        new_password: &str,
    ) -> Result<()> {
        let hash = self.hasher.hash(&Password::new(new_password)?)?;

        self.store
            .update_user(
                user_id,
                UserUpdate {
                    password_hash: Some(hash),
                    ..UserUpdate::default()
                },
            )
            .await?;

        Ok(())
    }

    /// Flip a pending account to active.
    ///
    /// One-directional; there is no transition back.
    pub async fn activate(&self, user_id: UserId) -> Result<User> {
        self.store
            .update_user(
                user_id,
                UserUpdate {
                    active: Some(true),
                    ..UserUpdate::default()
                },
            )
            .await
    }

    /// Update the optional profile names.
    ///
    /// `None` fields are left untouched.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<User> {
        validate_name("first_name", first_name.as_deref())?;
        validate_name("last_name", last_name.as_deref())?;

        self.store
            .update_user(
                user_id,
                UserUpdate {
                    first_name,
                    last_name,
                    ..UserUpdate::default()
                },
            )
            .await
    }

    /// Attach a new role to a user.
    ///
    /// Fails with `DuplicateKey` if the role name already exists
    /// anywhere, per the store-wide uniqueness of role names.
    pub async fn assign_role(
        &self,
        user_id: UserId,
        role_name: &str,
    ) -> Result<Role> {
        let name = RoleName::parse(role_name)?;

        self.store
            .create_role(NewRole {
                name,
                user_id: Some(user_id),
            })
            .await
    }

    /// Look up a user by an untrusted textual identifier.
    ///
    /// Anything that does not read as a decimal id reports `NotFound`
    /// rather than an input error, mirroring a lookup miss.
    pub async fn get_user(&self, id: &str) -> Result<User> {
        let Some(id) = UserId::parse(id) else {
            return Err(IdentityError::NotFound);
        };

        self.store
            .find_user_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound)
    }

    /// Roles attached to a user, in creation order.
    pub async fn roles_of(&self, user_id: UserId) -> Result<Vec<Role>> {
        self.store.list_roles_for_user(user_id).await
    }
}

fn validate_name(field: &'static str, value: Option<&str>) -> Result<()> {
    if value.is_some_and(|name| name.len() > NAME_MAX_LENGTH) {
        return Err(DomainError::ValidationFailed {
            field: field.into(),
            message: format!("must be at most {NAME_MAX_LENGTH} bytes"),
        }
        .into());
    }

    Ok(())
}
