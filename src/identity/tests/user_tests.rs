//! Unit tests for user aggregate invariants.

use crate::client::domain::ClientId;
use crate::identity::domain::{
    EmailAddress, IdentityDomainError, PasswordHash, Role, User,
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn email(value: &str) -> EmailAddress {
    EmailAddress::new(value).expect("valid test email")
}

#[rstest]
fn client_role_requires_client_link(clock: DefaultClock) {
    let result = User::new(
        email("contact@example.com"),
        "Client Contact",
        Role::Client,
        None,
        None,
        &clock,
    );

    assert!(matches!(
        result,
        Err(IdentityDomainError::MissingClientLink(_))
    ));
}

#[rstest]
#[case(Role::Admin)]
#[case(Role::Worker)]
fn staff_roles_reject_client_link(#[case] role: Role, clock: DefaultClock) {
    let result = User::new(
        email("staff@example.com"),
        "Staff Member",
        role,
        Some(ClientId::new()),
        None,
        &clock,
    );

    assert!(matches!(
        result,
        Err(IdentityDomainError::UnexpectedClientLink(_))
    ));
}

#[rstest]
fn blank_display_name_is_rejected(clock: DefaultClock) {
    let result = User::new(email("a@example.com"), "   ", Role::Worker, None, None, &clock);

    assert!(matches!(result, Err(IdentityDomainError::EmptyDisplayName)));
}

#[rstest]
fn activation_sets_credentials_once(clock: DefaultClock) -> eyre::Result<()> {
    let mut user = User::new(
        email("contact@example.com"),
        "Client Contact",
        Role::Client,
        Some(ClientId::new()),
        None,
        &clock,
    )?;
    ensure!(!user.is_active());

    let hash = PasswordHash::derive("long enough password")?;
    user.activate(hash, &clock)?;
    ensure!(user.is_active());
    ensure!(user.verify_password("long enough password"));

    let second = PasswordHash::derive("another password")?;
    let result = user.activate(second, &clock);
    ensure!(result == Err(IdentityDomainError::AlreadyActivated(user.id())));
    Ok(())
}

#[rstest]
fn inactive_accounts_never_verify(clock: DefaultClock) -> eyre::Result<()> {
    let user = User::new(
        email("contact@example.com"),
        "Client Contact",
        Role::Client,
        Some(ClientId::new()),
        None,
        &clock,
    )?;

    ensure!(!user.verify_password("long enough password"));
    Ok(())
}

#[rstest]
#[case("not-an-email")]
#[case("two@@example.com")]
#[case("missing-domain@")]
#[case("@example.com")]
#[case("user@nodot")]
fn email_validation_rejects_malformed_input(#[case] raw: &str) {
    assert!(EmailAddress::new(raw).is_err());
}

#[rstest]
fn email_is_normalized() {
    let address = email("  Client.Contact@Example.COM ");
    assert_eq!(address.as_str(), "client.contact@example.com");
}
