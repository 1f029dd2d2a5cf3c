//! Unit tests for access token issue and verification.

use crate::client::domain::ClientId;
use crate::identity::{
    domain::{EmailAddress, Role, User},
    services::{JwtCodec, TokenError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn codec() -> JwtCodec {
    JwtCodec::new("unit-test-secret", 60)
}

fn client_user() -> User {
    User::new(
        EmailAddress::new("contact@example.com").expect("valid test email"),
        "Client Contact",
        Role::Client,
        Some(ClientId::new()),
        None,
        &DefaultClock,
    )
    .expect("valid test user")
}

#[rstest]
fn issue_and_verify_round_trips_identity(codec: JwtCodec) {
    let user = client_user();

    let token = codec.issue(&user, &DefaultClock).expect("issue succeeds");
    let actor = codec.verify(&token).expect("verification succeeds");

    assert_eq!(actor.user_id(), user.id());
    assert_eq!(actor.role(), Role::Client);
    assert_eq!(actor.client_id(), user.client_id());
}

#[rstest]
fn tampered_token_is_rejected(codec: JwtCodec) {
    let user = client_user();
    let token = codec.issue(&user, &DefaultClock).expect("issue succeeds");
    let tampered = format!("{token}x");

    assert!(matches!(codec.verify(&tampered), Err(TokenError::Invalid)));
}

#[rstest]
fn foreign_secret_is_rejected(codec: JwtCodec) {
    let user = client_user();
    let other = JwtCodec::new("a-different-secret", 60);
    let token = other.issue(&user, &DefaultClock).expect("issue succeeds");

    assert!(matches!(codec.verify(&token), Err(TokenError::Invalid)));
}

#[rstest]
fn expired_token_is_rejected() {
    // Issue with a negative lifetime so the token is already stale.
    let codec = JwtCodec::new("unit-test-secret", -120);
    let user = client_user();
    let token = codec.issue(&user, &DefaultClock).expect("issue succeeds");

    assert!(matches!(codec.verify(&token), Err(TokenError::Expired)));
}
