//! Behaviour of the account service against mocked ports.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository, StoredCredentials};

const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "Analyt1cal!";

#[fixture]
fn user_id() -> UserId {
    UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id")
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::parse(EMAIL, password).expect("valid credentials")
}

fn hasher_accepting(expected: &'static str) -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|plain| Ok(PasswordHash::new(format!("hashed:{plain}"))));
    hasher
        .expect_verify()
        .returning(move |plain, hash| Ok(hash.as_str() == format!("hashed:{plain}") && plain == expected));
    hasher
}

#[rstest]
#[tokio::test]
async fn authenticate_returns_user_id_for_matching_password(user_id: UserId) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_active_credentials()
        .times(1)
        .returning(move |_| {
            Ok(Some(StoredCredentials {
                user_id,
                password_hash: PasswordHash::new(format!("hashed:{PASSWORD}")),
            }))
        });

    let service = PasswordAccountService::new(Arc::new(users), Arc::new(hasher_accepting(PASSWORD)));

    let resolved = service
        .authenticate(&credentials(PASSWORD))
        .await
        .expect("valid credentials");
    assert_eq!(resolved, user_id);
}

#[rstest]
#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable(user_id: UserId) {
    let mut known = MockUserRepository::new();
    known.expect_find_active_credentials().returning(move |_| {
        Ok(Some(StoredCredentials {
            user_id,
            password_hash: PasswordHash::new(format!("hashed:{PASSWORD}")),
        }))
    });
    let mut unknown = MockUserRepository::new();
    unknown
        .expect_find_active_credentials()
        .returning(|_| Ok(None));

    let wrong_password = PasswordAccountService::new(
        Arc::new(known),
        Arc::new(hasher_accepting(PASSWORD)),
    )
    .authenticate(&credentials("Analyt1cal!x"))
    .await
    .expect_err("wrong password");
    let unknown_email = PasswordAccountService::new(
        Arc::new(unknown),
        Arc::new(hasher_accepting(PASSWORD)),
    )
    .authenticate(&credentials(PASSWORD))
    .await
    .expect_err("unknown email");

    assert_eq!(wrong_password, AccountError::InvalidCredentials);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[rstest]
#[tokio::test]
async fn unknown_email_still_runs_one_verification() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_active_credentials()
        .times(2)
        .returning(|_| Ok(None));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Ok(PasswordHash::new("decoy")));
    hasher.expect_verify().times(2).returning(|_, _| Ok(false));

    let service = PasswordAccountService::new(Arc::new(users), Arc::new(hasher));
    for _ in 0..2 {
        let err = service
            .authenticate(&credentials(PASSWORD))
            .await
            .expect_err("unknown email");
        assert_eq!(err, AccountError::InvalidCredentials);
    }
}

#[rstest]
#[tokio::test]
async fn warmed_service_only_verifies_during_login() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_active_credentials()
        .times(1)
        .returning(|_| Ok(None));

    let mut hasher = MockPasswordHasher::new();
    let mut seq = mockall::Sequence::new();
    hasher
        .expect_hash()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(PasswordHash::new("decoy")));
    hasher
        .expect_verify()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, hash| {
            assert_eq!(hash.as_str(), "decoy");
            Ok(false)
        });

    let service = PasswordAccountService::new(Arc::new(users), Arc::new(hasher));
    service.warm().await.expect("decoy hashed");

    let err = service
        .authenticate(&credentials(PASSWORD))
        .await
        .expect_err("unknown email");
    assert_eq!(err, AccountError::InvalidCredentials);
}

#[rstest]
#[tokio::test]
async fn warm_surfaces_hasher_failure() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Err(PasswordHashError::hash("out of memory")));

    let service = PasswordAccountService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(hasher),
    );

    let err = service.warm().await.expect_err("hasher failure");
    assert!(matches!(err, AccountError::Hashing { .. }));
}

#[rstest]
#[tokio::test]
async fn register_stores_hash_not_plaintext(user_id: UserId) {
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .withf(|user| {
            user.email == EMAIL
                && user.password_hash.as_str() == format!("hashed:{PASSWORD}")
                && user.password_hash.as_str() != PASSWORD
        })
        .returning(move |user| {
            Ok(User {
                id: user_id,
                name: user.name,
                email: user.email,
                activated: true,
                created_at: Utc::now(),
            })
        });

    let service = PasswordAccountService::new(Arc::new(users), Arc::new(hasher_accepting(PASSWORD)));
    let request = SignupRequest::parse("Ada", EMAIL, PASSWORD).expect("valid signup");

    let user = service.register(request).await.expect("registered");
    assert_eq!(user.id, user_id);
    assert!(user.activated);
}

#[rstest]
#[tokio::test]
async fn register_maps_conflict_to_duplicate_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .returning(|_| Err(RepositoryError::conflict("users_email_key")));

    let service = PasswordAccountService::new(Arc::new(users), Arc::new(hasher_accepting(PASSWORD)));
    let request = SignupRequest::parse("Ada", EMAIL, PASSWORD).expect("valid signup");

    let err = service.register(request).await.expect_err("duplicate");
    assert_eq!(err, AccountError::DuplicateEmail);
}

#[rstest]
#[tokio::test]
async fn storage_timeout_is_not_reported_as_bad_credentials() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_active_credentials()
        .returning(|_| Err(RepositoryError::timeout("find user by email")));

    let service = PasswordAccountService::new(Arc::new(users), Arc::new(MockPasswordHasher::new()));
    let err = service
        .authenticate(&credentials(PASSWORD))
        .await
        .expect_err("timeout");
    assert!(matches!(err, AccountError::Persistence { .. }));
}
