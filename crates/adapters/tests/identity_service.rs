//! End-to-end exercises of the identity service over the in-memory
//! store with a real Argon2 hasher.

use adapters::outbound::crypto::Argon2PasswordHasher;
use adapters::outbound::persistence::memory::InMemoryIdentityStore;
use application::dto::RegisterRequest;
use application::error::IdentityError;
use application::service::IdentityService;
use domain::identity::id::UserId;

/// Cheap Argon2 parameters so the suite stays fast.
fn service() -> IdentityService {
    IdentityService::new(
        Box::new(InMemoryIdentityStore::new()),
        Box::new(Argon2PasswordHasher::new(1024, 1, 1).unwrap()),
    )
}

fn request(username: &str, email: &str, password: Option<&str>) -> RegisterRequest {
    RegisterRequest {
        username: username.into(),
        email: email.into(),
        password: password.map(str::to_owned),
        first_name: None,
        last_name: None,
    }
}

#[tokio::test]
async fn test_register_then_lookup() {
    let service = service();

    let user = service
        .register(request("alice", "alice@x.com", Some("secret1")))
        .await
        .unwrap();

    assert_eq!(user.id, UserId::from(1));
    assert_eq!(user.username.as_str(), "alice");
    assert_eq!(user.email.as_str(), "alice@x.com");
    assert!(!user.active);
    assert!(user.has_password());

    let found = service.get_user("1").await.unwrap();
    assert_eq!(found, user);
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
    let service = service();
    service
        .register(request("alice", "alice@x.com", None))
        .await
        .unwrap();

    let err = service
        .register(request("alice", "other@x.com", None))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IdentityError::DuplicateKey { field: "username" }
    ));

    // The failed registration left no partial record behind.
    assert!(matches!(
        service.get_user("2").await.unwrap_err(),
        IdentityError::NotFound
    ));
}

#[tokio::test]
async fn test_register_validates_input() {
    let service = service();

    assert!(matches!(
        service
            .register(request("", "a@x.com", None))
            .await
            .unwrap_err(),
        IdentityError::Domain(_)
    ));
    assert!(matches!(
        service
            .register(request("alice", "not-an-email", None))
            .await
            .unwrap_err(),
        IdentityError::Domain(_)
    ));
    assert!(matches!(
        service
            .register(request("alice", "a@x.com", Some("")))
            .await
            .unwrap_err(),
        IdentityError::Domain(_)
    ));
}

#[tokio::test]
async fn test_password_lifecycle() {
    let service = service();

    let user = service
        .register(request("alice", "alice@x.com", Some("secret1")))
        .await
        .unwrap();
    assert_eq!(user.id, UserId::from(1));

    let authenticated = service.authenticate("alice", "secret1").await.unwrap();
    assert_eq!(authenticated.id, user.id);

    assert!(matches!(
        service.authenticate("alice", "wrong").await.unwrap_err(),
        IdentityError::AuthFailure
    ));

    service.set_password(user.id, "secret2").await.unwrap();

    assert!(matches!(
        service.authenticate("alice", "secret1").await.unwrap_err(),
        IdentityError::AuthFailure
    ));
    let authenticated = service.authenticate("alice", "secret2").await.unwrap();
    assert_eq!(authenticated.id, user.id);
}

#[tokio::test]
async fn test_auth_failure_is_generic() {
    let service = service();
    service
        .register(request("alice", "alice@x.com", Some("secret1")))
        .await
        .unwrap();
    service
        .register(request("pending", "pending@x.com", None))
        .await
        .unwrap();

    // Wrong password, unknown user and passwordless account are
    // indistinguishable from the caller's side.
    let wrong_password =
        service.authenticate("alice", "nope").await.unwrap_err();
    let unknown_user =
        service.authenticate("nobody", "nope").await.unwrap_err();
    let no_password =
        service.authenticate("pending", "nope").await.unwrap_err();

    for err in [wrong_password, unknown_user, no_password] {
        assert!(matches!(err, IdentityError::AuthFailure));
    }
}

#[tokio::test]
async fn test_authenticate_by_email_fallback() {
    let service = service();
    service
        .register(request("alice", "Alice@X.com", Some("secret1")))
        .await
        .unwrap();

    // Email is stored lowercase and the identifier is normalized the
    // same way before the fallback lookup.
    let user = service
        .authenticate("ALICE@X.COM", "secret1")
        .await
        .unwrap();
    assert_eq!(user.email.as_str(), "alice@x.com");
}

#[tokio::test]
async fn test_lenient_id_lookup() {
    let service = service();
    service
        .register(request("alice", "alice@x.com", None))
        .await
        .unwrap();

    assert!(service.get_user("1").await.is_ok());

    for garbage in ["not-a-number", "", "-1", "1.5", "99999999999999999999999"] {
        assert!(
            matches!(
                service.get_user(garbage).await.unwrap_err(),
                IdentityError::NotFound
            ),
            "expected NotFound for {garbage:?}"
        );
    }
}

#[tokio::test]
async fn test_assign_and_list_roles() {
    let service = service();
    let user = service
        .register(request("alice", "alice@x.com", None))
        .await
        .unwrap();

    let role = service.assign_role(user.id, "admin").await.unwrap();
    assert_eq!(role.name.as_str(), "admin");
    assert_eq!(role.user_id, Some(user.id));

    let roles = service.roles_of(user.id).await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0], role);

    assert!(matches!(
        service.assign_role(user.id, "admin").await.unwrap_err(),
        IdentityError::DuplicateKey { field: "name" }
    ));
    assert!(matches!(
        service
            .assign_role(UserId::from(404), "ghost")
            .await
            .unwrap_err(),
        IdentityError::NotFound
    ));
}

#[tokio::test]
async fn test_activation_is_one_directional() {
    let service = service();
    let user = service
        .register(request("alice", "alice@x.com", None))
        .await
        .unwrap();
    assert!(!user.active);

    let user = service.activate(user.id).await.unwrap();
    assert!(user.active);

    // Activating twice is a no-op, not a toggle.
    let user = service.activate(user.id).await.unwrap();
    assert!(user.active);
}

#[tokio::test]
async fn test_update_profile_and_full_name() {
    let service = service();
    let user = service
        .register(request("alice", "alice@x.com", None))
        .await
        .unwrap();
    assert_eq!(user.full_name(), None);

    let user = service
        .update_profile(user.id, Some("Alice".into()), Some("Smith".into()))
        .await
        .unwrap();
    assert_eq!(user.full_name().as_deref(), Some("Alice Smith"));

    let err = service
        .update_profile(user.id, Some("x".repeat(101)), None)
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::Domain(_)));
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() {
    let store = InMemoryIdentityStore::new();
    let first = IdentityService::new(
        Box::new(store.clone()),
        Box::new(Argon2PasswordHasher::new(1024, 1, 1).unwrap()),
    );
    let second = IdentityService::new(
        Box::new(store),
        Box::new(Argon2PasswordHasher::new(1024, 1, 1).unwrap()),
    );

    let (left, right) = tokio::join!(
        first.register(request("alice", "a@x.com", None)),
        second.register(request("alice", "b@x.com", None)),
    );

    assert!(left.is_ok() != right.is_ok());
}
