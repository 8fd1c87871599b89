//! In-process implementation of the identity store.
//!
//! Primary store for tests and embedded use. A single mutex serializes
//! writes, so the uniqueness invariants hold under concurrent callers
//! exactly as they do behind a database's unique indexes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use application::dto::{NewRole, NewUser, UserUpdate};
use application::error::{IdentityError, Result};
use application::ports::outbound::{Clock, IdentityStore};
use async_trait::async_trait;
use domain::identity::id::{RoleId, UserId};
use domain::identity::role::Role;
use domain::identity::user::User;

use crate::outbound::clock::SystemClock;

/// In-memory identity store.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct InMemoryIdentityStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<State>,
    clock: Box<dyn Clock>,
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    roles: Vec<Role>,
    last_user_id: i64,
    last_role_id: i64,
}

impl InMemoryIdentityStore {
    /// Create an empty store stamping records with the system clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock::new()))
    }

    /// Create an empty store with an explicit time source.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
                clock,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn create_user(&self, new: NewUser) -> Result<User> {
        let mut state = self.lock();

        if state
            .users
            .iter()
            .any(|u| u.username.as_str() == new.username.as_str())
        {
            return Err(IdentityError::DuplicateKey { field: "username" });
        }
        if state
            .users
            .iter()
            .any(|u| u.email.as_str() == new.email.as_str())
        {
            return Err(IdentityError::DuplicateKey { field: "email" });
        }

        state.last_user_id += 1;
        let user = User {
            id: UserId::from(state.last_user_id),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            created_at: self.inner.clock.now(),
            first_name: new.first_name,
            last_name: new.last_name,
            active: false,
        };

        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn update_user(
        &self,
        id: UserId,
        changes: UserUpdate,
    ) -> Result<User> {
        let mut state = self.lock();

        let index = state
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(IdentityError::NotFound)?;

        if let Some(username) = &changes.username {
            if state
                .users
                .iter()
                .any(|u| u.id != id && u.username == *username)
            {
                return Err(IdentityError::DuplicateKey {
                    field: "username",
                });
            }
        }
        if let Some(email) = &changes.email {
            if state.users.iter().any(|u| u.id != id && u.email == *email) {
                return Err(IdentityError::DuplicateKey { field: "email" });
            }
        }

        let user = &mut state.users[index];
        if let Some(username) = changes.username {
            user.username = username;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = Some(hash);
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(active) = changes.active {
            user.active = active;
        }

        Ok(user.clone())
    }

    async fn create_role(&self, new: NewRole) -> Result<Role> {
        let mut state = self.lock();

        if state
            .roles
            .iter()
            .any(|r| r.name.as_str() == new.name.as_str())
        {
            return Err(IdentityError::DuplicateKey { field: "name" });
        }
        if let Some(user_id) = new.user_id {
            if !state.users.iter().any(|u| u.id == user_id) {
                return Err(IdentityError::NotFound);
            }
        }

        state.last_role_id += 1;
        let role = Role {
            id: RoleId::from(state.last_role_id),
            name: new.name,
            user_id: new.user_id,
        };

        state.roles.push(role.clone());
        Ok(role)
    }

    async fn list_roles_for_user(&self, user_id: UserId) -> Result<Vec<Role>> {
        // Insertion order is creation order.
        Ok(self
            .lock()
            .roles
            .iter()
            .filter(|r| r.user_id == Some(user_id))
            .cloned()
            .collect())
    }
}
