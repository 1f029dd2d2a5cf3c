//! Client onboarding: invite issuance, acceptance, and login.

use atelier::client::ports::ClientRepositoryError;
use atelier::client::services::ClientDirectoryError;
use atelier::hosting::services::CreateDomainRecordRequest;
use atelier::identity::domain::{IdentityDomainError, Role};
use atelier::identity::services::{AuthError, RegisterUserRequest};
use atelier::task::services::CreateTaskRequest;
use chrono::{Duration, Utc};
use rstest::rstest;

use super::helpers::{Portal, admin, portal, seeded_client};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invited_contact_activates_and_logs_in(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let request = RegisterUserRequest::new("contact@studionord.example", "Studio Contact", Role::Client)
        .with_client(client_id);
    let user = portal
        .auth
        .register_user(&admin(), request)
        .await
        .expect("registration succeeds");
    let issued = portal
        .auth
        .issue_invite(&admin(), user.id())
        .await
        .expect("invite issuance succeeds");

    portal
        .auth
        .accept_invite(issued.token.as_str(), "a freshly chosen password")
        .await
        .expect("invite acceptance succeeds");
    let logged_in = portal
        .auth
        .login("contact@studionord.example", "a freshly chosen password")
        .await
        .expect("login succeeds after activation");

    assert_eq!(logged_in.id(), user.id());
    assert_eq!(logged_in.client_id(), Some(client_id));
    assert!(logged_in.is_active());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_fails_before_activation(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let request = RegisterUserRequest::new("contact@studionord.example", "Studio Contact", Role::Client)
        .with_client(client_id);
    portal
        .auth
        .register_user(&admin(), request)
        .await
        .expect("registration succeeds");

    let result = portal
        .auth
        .login("contact@studionord.example", "any password at all")
        .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_invite_cannot_be_accepted() {
    let portal = Portal::with_invite_ttl(Duration::seconds(0));
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let request = RegisterUserRequest::new("contact@studionord.example", "Studio Contact", Role::Client)
        .with_client(client_id);
    let user = portal
        .auth
        .register_user(&admin(), request)
        .await
        .expect("registration succeeds");
    let issued = portal
        .auth
        .issue_invite(&admin(), user.id())
        .await
        .expect("invite issuance succeeds");

    let result = portal
        .auth
        .accept_invite(issued.token.as_str(), "a freshly chosen password")
        .await;

    assert!(matches!(
        result,
        Err(AuthError::Domain(IdentityDomainError::InviteExpired(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reissuing_invalidates_the_earlier_token(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let request = RegisterUserRequest::new("contact@studionord.example", "Studio Contact", Role::Client)
        .with_client(client_id);
    let user = portal
        .auth
        .register_user(&admin(), request)
        .await
        .expect("registration succeeds");
    let first = portal
        .auth
        .issue_invite(&admin(), user.id())
        .await
        .expect("first invite succeeds");
    portal
        .auth
        .issue_invite(&admin(), user.id())
        .await
        .expect("second invite succeeds");

    let result = portal
        .auth
        .accept_invite(first.token.as_str(), "a freshly chosen password")
        .await;

    assert!(matches!(result, Err(AuthError::UnknownInvite)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn client_with_dependents_cannot_be_deleted(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let task = portal
        .tasks
        .create_task(&admin(), CreateTaskRequest::new(client_id, "Relaunch homepage"))
        .await
        .expect("task creation succeeds");
    portal
        .hosting
        .create_record(
            &admin(),
            CreateDomainRecordRequest::new(
                client_id,
                "studionord.example",
                Utc::now().date_naive() + Duration::days(200),
            ),
        )
        .await
        .expect("record creation succeeds");

    let blocked = portal.directory.delete_client(&admin(), client_id).await;
    assert!(matches!(
        blocked,
        Err(ClientDirectoryError::Clients(
            ClientRepositoryError::HasDependents(_)
        ))
    ));

    portal
        .tasks
        .delete_task(&admin(), task.id())
        .await
        .expect("task deletion succeeds");
    let records = portal
        .hosting
        .list_records(&admin())
        .await
        .expect("listing succeeds");
    for record in records {
        portal
            .hosting
            .delete_record(&admin(), record.id())
            .await
            .expect("record deletion succeeds");
    }

    portal
        .directory
        .delete_client(&admin(), client_id)
        .await
        .expect("deletion succeeds once no dependents remain");
}
