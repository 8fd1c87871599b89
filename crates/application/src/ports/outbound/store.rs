//! Identity persistence port.

use async_trait::async_trait;
use domain::identity::id::UserId;
use domain::identity::role::Role;
use domain::identity::user::User;

use crate::dto::{NewRole, NewUser, UserUpdate};
use crate::error::Result;

/// Port for user and role persistence.
///
/// Every operation is atomic with respect to the uniqueness invariants:
/// of two concurrent writes colliding on a unique field, exactly one
/// succeeds and the other fails with `DuplicateKey`. The store is the
/// sole arbiter of consistency; the service never locks.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Insert a new user, assigning its id and creation timestamp.
    ///
    /// Fails with `DuplicateKey` if the username or email is taken.
    async fn create_user(&self, new: NewUser) -> Result<User>;

    /// Find a user by store-assigned id.
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Find a user by exact username.
    async fn find_user_by_username(&self, username: &str)
    -> Result<Option<User>>;

    /// Find a user by normalized (lowercase) email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Apply a patch to an existing user and return the updated record.
    ///
    /// Fails with `NotFound` if the id is absent and with `DuplicateKey`
    /// if the patch collides on username or email.
    async fn update_user(&self, id: UserId, changes: UserUpdate)
    -> Result<User>;

    /// Insert a new role, assigning its id.
    ///
    /// Fails with `DuplicateKey` on a name collision and with `NotFound`
    /// if `user_id` is set but references no existing user.
    async fn create_role(&self, new: NewRole) -> Result<Role>;

    /// Roles attached to a user, in creation order.
    async fn list_roles_for_user(&self, user_id: UserId) -> Result<Vec<Role>>;
}
