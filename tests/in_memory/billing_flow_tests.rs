//! Billing flow: invoice lifecycle, offer decisions, and offer documents.

use atelier::billing::domain::{InvoiceParty, InvoiceStatus, LineItem, Money, OfferStatus};
use atelier::billing::ports::InvoiceRepositoryError;
use atelier::billing::services::{
    CreateInvoiceRequest, CreateOfferRequest, InvoiceServiceError, OfferServiceError,
};
use atelier::client::domain::ClientId;
use chrono::{Duration, Utc};
use rstest::rstest;

use super::helpers::{Portal, admin, client_actor, portal, seeded_client, seeded_worker};

fn design_work() -> Vec<LineItem> {
    vec![
        LineItem::new("Design sprint", 2, Money::from_cents(120_000)).expect("valid item"),
        LineItem::new("Frontend build", 1, Money::from_cents(340_000)).expect("valid item"),
    ]
}

fn receivable(number: &str, client_id: ClientId) -> CreateInvoiceRequest {
    let issued_on = Utc::now().date_naive();
    CreateInvoiceRequest::new(
        number,
        InvoiceParty::Client(client_id),
        design_work(),
        issued_on,
        issued_on + Duration::days(14),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invoice_runs_from_draft_to_paid(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let invoice = portal
        .invoices
        .create_invoice(&admin(), receivable("2026-0042", client_id))
        .await
        .expect("invoice creation succeeds");
    assert_eq!(invoice.status(), InvoiceStatus::Draft);
    assert_eq!(
        invoice.total().expect("total fits").cents(),
        2 * 120_000 + 340_000
    );

    let sent = portal
        .invoices
        .send_invoice(&admin(), invoice.id())
        .await
        .expect("send succeeds");
    assert_eq!(sent.status(), InvoiceStatus::Sent);

    let paid = portal
        .invoices
        .mark_paid(&admin(), invoice.id())
        .await
        .expect("payment succeeds");
    assert_eq!(paid.status(), InvoiceStatus::Paid);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invoice_numbers_are_unique(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    portal
        .invoices
        .create_invoice(&admin(), receivable("2026-0042", client_id))
        .await
        .expect("first invoice succeeds");

    let result = portal
        .invoices
        .create_invoice(&admin(), receivable("2026-0042", client_id))
        .await;

    assert!(matches!(
        result,
        Err(InvoiceServiceError::Invoices(
            InvoiceRepositoryError::DuplicateNumber(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sent_invoices_cannot_be_deleted(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let invoice = portal
        .invoices
        .create_invoice(&admin(), receivable("2026-0042", client_id))
        .await
        .expect("invoice creation succeeds");
    portal
        .invoices
        .send_invoice(&admin(), invoice.id())
        .await
        .expect("send succeeds");

    let result = portal.invoices.delete_invoice(&admin(), invoice.id()).await;

    assert!(matches!(result, Err(InvoiceServiceError::NotDraft(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_receivables_read_as_missing(portal: Portal) {
    let billed = seeded_client(&portal, "Studio Nord").await;
    let other = seeded_client(&portal, "Atelier Sued").await;
    let worker = seeded_worker(&portal, "dev@example.com").await;
    let invoice = portal
        .invoices
        .create_invoice(&admin(), receivable("2026-0042", billed))
        .await
        .expect("invoice creation succeeds");

    let own = portal
        .invoices
        .get_invoice(&client_actor(billed), invoice.id())
        .await
        .expect("the billed client sees the invoice");
    assert_eq!(own.id(), invoice.id());

    let foreign = portal
        .invoices
        .get_invoice(&client_actor(other), invoice.id())
        .await;
    assert!(matches!(
        foreign,
        Err(InvoiceServiceError::InvoiceMissing(_))
    ));

    let payables = portal
        .invoices
        .list_invoices(&worker)
        .await
        .expect("workers list their payables");
    assert!(payables.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn client_accepts_a_sent_offer(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let valid_until = Utc::now().date_naive() + Duration::days(30);
    let offer = portal
        .offers
        .create_offer(
            &admin(),
            CreateOfferRequest::new(client_id, "Website relaunch", design_work(), valid_until),
        )
        .await
        .expect("offer creation succeeds");
    assert_eq!(offer.status(), OfferStatus::Draft);

    portal
        .offers
        .send_offer(&admin(), offer.id())
        .await
        .expect("send succeeds");
    let accepted = portal
        .offers
        .accept_offer(&client_actor(client_id), offer.id())
        .await
        .expect("the addressed client accepts");

    assert_eq!(accepted.status(), OfferStatus::Accepted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_clients_cannot_decide_offers(portal: Portal) {
    let addressed = seeded_client(&portal, "Studio Nord").await;
    let other = seeded_client(&portal, "Atelier Sued").await;
    let valid_until = Utc::now().date_naive() + Duration::days(30);
    let offer = portal
        .offers
        .create_offer(
            &admin(),
            CreateOfferRequest::new(addressed, "Website relaunch", design_work(), valid_until),
        )
        .await
        .expect("offer creation succeeds");
    portal
        .offers
        .send_offer(&admin(), offer.id())
        .await
        .expect("send succeeds");

    let result = portal
        .offers
        .decline_offer(&client_actor(other), offer.id())
        .await;

    assert!(matches!(result, Err(OfferServiceError::Forbidden)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn offer_document_carries_letterhead_and_items(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let valid_until = Utc::now().date_naive() + Duration::days(30);
    let offer = portal
        .offers
        .create_offer(
            &admin(),
            CreateOfferRequest::new(client_id, "Website relaunch", design_work(), valid_until),
        )
        .await
        .expect("offer creation succeeds");

    let html = portal
        .offers
        .render_document(&client_actor(client_id), offer.id())
        .await
        .expect("rendering succeeds");

    assert!(html.contains("Studio Nord"));
    assert!(html.contains("Website relaunch"));
    assert!(html.contains("Design sprint"));
}
