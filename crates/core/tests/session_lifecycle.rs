// Credential and session-token lifecycle through the public API

use std::time::Duration;

use chrono::Utc;
use gatekeep_core::{
    parse_ttl, AuthError, CredentialManager, HashingParams, LoginInput, RegisterInput,
    SessionTokenService,
};
use uuid::Uuid;

fn credentials() -> CredentialManager {
    CredentialManager::new(HashingParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}

#[test]
fn test_register_then_login_lifecycle() {
    let register = RegisterInput {
        name: "Ann".to_string(),
        email: "a@x.com".to_string(),
        password: "secret1".to_string(),
    };
    register.validate().unwrap();

    let credentials = credentials();
    let stored_hash = credentials.hash(&register.password).unwrap();
    assert_ne!(stored_hash, register.password);

    let tokens = SessionTokenService::new("lifecycle-secret", parse_ttl("1h").unwrap()).unwrap();
    let user_id = Uuid::now_v7();
    let token = tokens.issue(user_id).unwrap();

    // Login with the wrong password
    let wrong = LoginInput {
        email: "a@x.com".to_string(),
        password: "wrong-password".to_string(),
    };
    wrong.validate().unwrap();
    assert!(matches!(
        credentials.verify(&wrong.password, &stored_hash),
        Err(AuthError::InvalidCredentials)
    ));

    // Login with the right password mints a token for the same user
    credentials.verify("secret1", &stored_hash).unwrap();
    let login_token = tokens.issue(user_id).unwrap();
    assert_eq!(tokens.verify(&login_token).unwrap(), user_id);
    assert_eq!(tokens.verify(&token).unwrap(), user_id);
}

#[test]
fn test_token_expires_after_ttl() {
    let tokens = SessionTokenService::new("lifecycle-secret", Duration::from_secs(60)).unwrap();
    let user_id = Uuid::now_v7();

    let fresh = tokens
        .issue_at(user_id, Utc::now() - chrono::Duration::seconds(30))
        .unwrap();
    assert_eq!(tokens.verify(&fresh).unwrap(), user_id);

    let stale = tokens
        .issue_at(user_id, Utc::now() - chrono::Duration::seconds(61))
        .unwrap();
    assert!(matches!(
        tokens.verify(&stale),
        Err(AuthError::Unauthenticated)
    ));
}

#[test]
fn test_secret_rotation_invalidates_tokens() {
    let ttl = Duration::from_secs(3600);
    let old = SessionTokenService::new("old-secret", ttl).unwrap();
    let new = SessionTokenService::new("new-secret", ttl).unwrap();

    let token = old.issue(Uuid::now_v7()).unwrap();
    assert!(new.verify(&token).is_err());
}
