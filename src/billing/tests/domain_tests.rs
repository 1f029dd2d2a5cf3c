//! Aggregate invariant tests for invoices and offers.

use crate::billing::domain::{
    BillingDomainError, Invoice, InvoiceNumber, InvoiceParty, LineItem, Money, Offer,
};
use crate::client::domain::ClientId;
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::rstest;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn items() -> Vec<LineItem> {
    vec![
        LineItem::new("Design", 2, Money::from_cents(40_000)).expect("valid item"),
        LineItem::new("Hosting setup", 1, Money::from_cents(12_050)).expect("valid item"),
    ]
}

#[rstest]
fn invoice_total_sums_line_items() {
    let invoice = Invoice::new(
        InvoiceNumber::new("2026-001").expect("valid number"),
        InvoiceParty::Client(ClientId::new()),
        items(),
        date(2026, 8, 1),
        date(2026, 8, 15),
        &DefaultClock,
    )
    .expect("valid invoice");

    assert_eq!(
        invoice.total().expect("no overflow"),
        Money::from_cents(92_050)
    );
}

#[rstest]
fn invoice_requires_line_items() {
    let result = Invoice::new(
        InvoiceNumber::new("2026-001").expect("valid number"),
        InvoiceParty::Client(ClientId::new()),
        Vec::new(),
        date(2026, 8, 1),
        date(2026, 8, 15),
        &DefaultClock,
    );

    assert!(matches!(result, Err(BillingDomainError::EmptyLineItems)));
}

#[rstest]
fn invoice_rejects_due_before_issue() {
    let result = Invoice::new(
        InvoiceNumber::new("2026-001").expect("valid number"),
        InvoiceParty::Client(ClientId::new()),
        items(),
        date(2026, 8, 15),
        date(2026, 8, 1),
        &DefaultClock,
    );

    assert!(matches!(
        result,
        Err(BillingDomainError::DueBeforeIssued { .. })
    ));
}

#[rstest]
fn invoice_number_rejects_blank() {
    assert!(matches!(
        InvoiceNumber::new("  "),
        Err(BillingDomainError::EmptyInvoiceNumber)
    ));
}

#[rstest]
#[case(date(2026, 8, 15), false)]
#[case(date(2026, 8, 16), false)]
#[case(date(2026, 8, 17), true)]
fn past_due_is_strictly_after_due_date(#[case] today: NaiveDate, #[case] past_due: bool) {
    let mut invoice = Invoice::new(
        InvoiceNumber::new("2026-001").expect("valid number"),
        InvoiceParty::Client(ClientId::new()),
        items(),
        date(2026, 8, 1),
        date(2026, 8, 16),
        &DefaultClock,
    )
    .expect("valid invoice");
    invoice
        .transition_to(crate::billing::domain::InvoiceStatus::Sent, &DefaultClock)
        .expect("send succeeds");

    assert_eq!(invoice.is_past_due(today), past_due);
}

#[rstest]
fn draft_invoice_is_never_past_due() {
    let invoice = Invoice::new(
        InvoiceNumber::new("2026-001").expect("valid number"),
        InvoiceParty::Client(ClientId::new()),
        items(),
        date(2026, 8, 1),
        date(2026, 8, 2),
        &DefaultClock,
    )
    .expect("valid invoice");

    assert!(!invoice.is_past_due(date(2030, 1, 1)));
}

#[rstest]
fn offer_decisions_respect_expiry() {
    let mut offer = Offer::new(
        ClientId::new(),
        "Website relaunch",
        items(),
        date(2026, 8, 31),
        &DefaultClock,
    )
    .expect("valid offer");
    offer.send(&DefaultClock).expect("send succeeds");

    let expired = offer.accept(date(2026, 9, 1), &DefaultClock);
    assert!(matches!(expired, Err(BillingDomainError::OfferExpired { .. })));

    offer
        .accept(date(2026, 8, 31), &DefaultClock)
        .expect("accept on the last valid day succeeds");
}

#[rstest]
fn offer_decline_requires_sent() {
    let mut offer = Offer::new(
        ClientId::new(),
        "Website relaunch",
        items(),
        date(2026, 8, 31),
        &DefaultClock,
    )
    .expect("valid offer");

    let result = offer.decline(date(2026, 8, 1), &DefaultClock);

    assert!(matches!(
        result,
        Err(BillingDomainError::InvalidOfferTransition { .. })
    ));
}

#[rstest]
fn offer_rejects_blank_title() {
    let result = Offer::new(
        ClientId::new(),
        "  ",
        items(),
        date(2026, 8, 31),
        &DefaultClock,
    );

    assert!(matches!(result, Err(BillingDomainError::EmptyDescription)));
}
