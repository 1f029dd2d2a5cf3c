//! Expiry alert reporting across roles.

use atelier::hosting::domain::ExpiryKind;
use atelier::hosting::services::{CreateDomainRecordRequest, HostingServiceError};
use chrono::{Duration, Utc};
use rstest::rstest;

use super::helpers::{Portal, admin, client_actor, portal, seeded_client, seeded_worker};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn alerts_cover_imminent_and_lapsed_dates(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let today = Utc::now().date_naive();
    portal
        .hosting
        .create_record(
            &admin(),
            CreateDomainRecordRequest::new(
                client_id,
                "studionord.example",
                today + Duration::days(10),
            )
            .with_ssl_expiry(today - Duration::days(3)),
        )
        .await
        .expect("record creation succeeds");
    portal
        .hosting
        .create_record(
            &admin(),
            CreateDomainRecordRequest::new(
                client_id,
                "calm.example",
                today + Duration::days(120),
            ),
        )
        .await
        .expect("record creation succeeds");

    let alerts = portal
        .hosting
        .expiring_alerts(&admin())
        .await
        .expect("alert listing succeeds");

    assert_eq!(alerts.len(), 2);
    let ssl = &alerts[0];
    assert_eq!(ssl.kind, ExpiryKind::Ssl);
    assert!(ssl.past_due);
    let domain = &alerts[1];
    assert_eq!(domain.kind, ExpiryKind::Domain);
    assert_eq!(domain.domain.as_str(), "studionord.example");
    assert!(!domain.past_due);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clients_only_see_their_own_alerts(portal: Portal) {
    let own = seeded_client(&portal, "Studio Nord").await;
    let other = seeded_client(&portal, "Atelier Sued").await;
    let today = Utc::now().date_naive();
    portal
        .hosting
        .create_record(
            &admin(),
            CreateDomainRecordRequest::new(own, "studionord.example", today + Duration::days(5)),
        )
        .await
        .expect("record creation succeeds");
    portal
        .hosting
        .create_record(
            &admin(),
            CreateDomainRecordRequest::new(other, "sued.example", today + Duration::days(5)),
        )
        .await
        .expect("record creation succeeds");

    let alerts = portal
        .hosting
        .expiring_alerts(&client_actor(own))
        .await
        .expect("alert listing succeeds");

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].client_id, own);
    assert_eq!(alerts[0].domain.as_str(), "studionord.example");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workers_have_no_hosting_access(portal: Portal) {
    let worker = seeded_worker(&portal, "dev@example.com").await;

    let result = portal.hosting.expiring_alerts(&worker).await;

    assert!(matches!(result, Err(HostingServiceError::Forbidden)));
}
