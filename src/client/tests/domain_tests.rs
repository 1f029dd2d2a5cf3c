//! Unit tests for client and project domain invariants.

use crate::client::domain::{ClientDomainError, ClientId, ClientProfile, Project};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[rstest]
fn profile_trims_and_normalizes(clock: DefaultClock) {
    let _ = clock;
    let profile = ClientProfile::new("  Acme GmbH  ", "Billing@Acme.example.COM")
        .expect("valid profile");

    assert_eq!(profile.company_name(), "Acme GmbH");
    assert_eq!(profile.contact_email().as_str(), "billing@acme.example.com");
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_company_name_is_rejected(#[case] name: &str) {
    assert_eq!(
        ClientProfile::new(name, "billing@acme.example.com"),
        Err(ClientDomainError::EmptyCompanyName)
    );
}

#[rstest]
fn malformed_contact_email_is_rejected() {
    let result = ClientProfile::new("Acme GmbH", "not-an-email");

    assert!(matches!(
        result,
        Err(ClientDomainError::InvalidContactEmail(_))
    ));
}

#[rstest]
fn project_requires_name(clock: DefaultClock) {
    let result = Project::new(ClientId::new(), "   ", None, &clock);

    assert_eq!(result, Err(ClientDomainError::EmptyProjectName));
}

#[rstest]
fn project_links_to_owning_client(clock: DefaultClock) {
    let client_id = ClientId::new();
    let project = Project::new(client_id, "Website relaunch", None, &clock)
        .expect("valid project");

    assert_eq!(project.client_id(), client_id);
    assert_eq!(project.name(), "Website relaunch");
    assert_eq!(project.created_at(), project.updated_at());
}
