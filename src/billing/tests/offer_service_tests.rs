//! Service orchestration tests for offers and document rendering.

use std::sync::Arc;

use crate::billing::{
    adapters::memory::InMemoryOfferRepository,
    domain::{BillingDomainError, LineItem, Money, OfferStatus},
    services::{CreateOfferRequest, OfferDocumentRenderer, OfferService, OfferServiceError},
};
use crate::client::adapters::memory::InMemoryClientRepository;
use crate::client::domain::{Client, ClientId, ClientProfile};
use crate::client::ports::ClientRepository;
use crate::identity::domain::{Actor, Role, UserId};
use chrono::{Duration, NaiveDate, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = OfferService<InMemoryOfferRepository, InMemoryClientRepository, DefaultClock>;

struct Harness {
    service: TestService,
    clients: Arc<InMemoryClientRepository>,
}

#[fixture]
fn harness() -> Harness {
    let clients = Arc::new(InMemoryClientRepository::new());
    let service = OfferService::new(
        Arc::new(InMemoryOfferRepository::new()),
        Arc::clone(&clients),
        Arc::new(OfferDocumentRenderer::new().expect("template parses")),
        Arc::new(DefaultClock),
    );
    Harness { service, clients }
}

fn admin() -> Actor {
    Actor::new(UserId::new(), Role::Admin, None)
}

fn items() -> Vec<LineItem> {
    vec![
        LineItem::new("Design sprint", 2, Money::from_cents(80_000)).expect("valid item"),
        LineItem::new("Deployment", 1, Money::from_cents(25_000)).expect("valid item"),
    ]
}

fn next_month() -> NaiveDate {
    (Utc::now() + Duration::days(30)).date_naive()
}

async fn seeded_client(clients: &InMemoryClientRepository) -> Client {
    let profile = ClientProfile::new("Acme GmbH", "billing@acme.example.com")
        .expect("valid profile");
    let client = Client::new(profile, &DefaultClock);
    clients.store(&client).await.expect("store succeeds");
    client
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn offers_require_an_existing_client(harness: Harness) {
    let request = CreateOfferRequest::new(ClientId::new(), "Relaunch", items(), next_month());

    let result = harness.service.create_offer(&admin(), request).await;

    assert!(matches!(result, Err(OfferServiceError::ClientMissing(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn client_accepts_own_offer(harness: Harness) {
    let client = seeded_client(&harness.clients).await;
    let offer = harness
        .service
        .create_offer(
            &admin(),
            CreateOfferRequest::new(client.id(), "Relaunch", items(), next_month()),
        )
        .await
        .expect("creation succeeds");
    harness
        .service
        .send_offer(&admin(), offer.id())
        .await
        .expect("send succeeds");

    let client_actor = Actor::new(UserId::new(), Role::Client, Some(client.id()));
    let accepted = harness
        .service
        .accept_offer(&client_actor, offer.id())
        .await
        .expect("acceptance succeeds");

    assert_eq!(accepted.status(), OfferStatus::Accepted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_client_cannot_decide(harness: Harness) {
    let client = seeded_client(&harness.clients).await;
    let offer = harness
        .service
        .create_offer(
            &admin(),
            CreateOfferRequest::new(client.id(), "Relaunch", items(), next_month()),
        )
        .await
        .expect("creation succeeds");
    harness
        .service
        .send_offer(&admin(), offer.id())
        .await
        .expect("send succeeds");

    let stranger = Actor::new(UserId::new(), Role::Client, Some(ClientId::new()));
    let result = harness.service.decline_offer(&stranger, offer.id()).await;

    assert!(matches!(result, Err(OfferServiceError::Forbidden)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_offer_cannot_be_accepted(harness: Harness) {
    let client = seeded_client(&harness.clients).await;
    let yesterday = (Utc::now() - Duration::days(1)).date_naive();
    let offer = harness
        .service
        .create_offer(
            &admin(),
            CreateOfferRequest::new(client.id(), "Relaunch", items(), yesterday),
        )
        .await
        .expect("creation succeeds");
    harness
        .service
        .send_offer(&admin(), offer.id())
        .await
        .expect("send succeeds");

    let result = harness.service.accept_offer(&admin(), offer.id()).await;

    assert!(matches!(
        result,
        Err(OfferServiceError::Domain(
            BillingDomainError::OfferExpired { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workers_cannot_browse_offers(harness: Harness) {
    let worker = Actor::new(UserId::new(), Role::Worker, None);

    let result = harness.service.list_offers(&worker).await;

    assert!(matches!(result, Err(OfferServiceError::Forbidden)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn document_carries_letterhead_items_and_totals(harness: Harness) {
    let client = seeded_client(&harness.clients).await;
    let offer = harness
        .service
        .create_offer(
            &admin(),
            CreateOfferRequest::new(client.id(), "Website relaunch", items(), next_month()),
        )
        .await
        .expect("creation succeeds");

    let html = harness
        .service
        .render_document(&admin(), offer.id())
        .await
        .expect("rendering succeeds");

    assert!(html.contains("Acme GmbH"));
    assert!(html.contains("Website relaunch"));
    assert!(html.contains("Design sprint"));
    assert!(html.contains("800.00"));
    assert!(html.contains("1600.00"));
    assert!(html.contains("1850.00"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn document_is_scoped_like_reads(harness: Harness) {
    let client = seeded_client(&harness.clients).await;
    let offer = harness
        .service
        .create_offer(
            &admin(),
            CreateOfferRequest::new(client.id(), "Relaunch", items(), next_month()),
        )
        .await
        .expect("creation succeeds");

    let stranger = Actor::new(UserId::new(), Role::Client, Some(ClientId::new()));
    let result = harness.service.render_document(&stranger, offer.id()).await;

    assert!(matches!(result, Err(OfferServiceError::OfferMissing(_))));
}
