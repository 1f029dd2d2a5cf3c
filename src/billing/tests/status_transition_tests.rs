//! Exhaustive checks over the invoice and offer state machines.

use crate::billing::domain::{InvoiceStatus, OfferStatus};
use rstest::rstest;

#[rstest]
// Drafts may be sent or withdrawn.
#[case(InvoiceStatus::Draft, InvoiceStatus::Sent, true)]
#[case(InvoiceStatus::Draft, InvoiceStatus::Paid, false)]
#[case(InvoiceStatus::Draft, InvoiceStatus::Overdue, false)]
#[case(InvoiceStatus::Draft, InvoiceStatus::Cancelled, true)]
// Sent invoices settle or lapse.
#[case(InvoiceStatus::Sent, InvoiceStatus::Draft, false)]
#[case(InvoiceStatus::Sent, InvoiceStatus::Paid, true)]
#[case(InvoiceStatus::Sent, InvoiceStatus::Overdue, true)]
#[case(InvoiceStatus::Sent, InvoiceStatus::Cancelled, false)]
// Overdue invoices can still be settled.
#[case(InvoiceStatus::Overdue, InvoiceStatus::Paid, true)]
#[case(InvoiceStatus::Overdue, InvoiceStatus::Sent, false)]
#[case(InvoiceStatus::Overdue, InvoiceStatus::Cancelled, false)]
// Terminal statuses admit nothing.
#[case(InvoiceStatus::Paid, InvoiceStatus::Sent, false)]
#[case(InvoiceStatus::Paid, InvoiceStatus::Overdue, false)]
#[case(InvoiceStatus::Cancelled, InvoiceStatus::Sent, false)]
#[case(InvoiceStatus::Cancelled, InvoiceStatus::Paid, false)]
fn invoice_transition_matrix(
    #[case] from: InvoiceStatus,
    #[case] to: InvoiceStatus,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[rstest]
#[case(InvoiceStatus::Draft, false)]
#[case(InvoiceStatus::Sent, false)]
#[case(InvoiceStatus::Overdue, false)]
#[case(InvoiceStatus::Paid, true)]
#[case(InvoiceStatus::Cancelled, true)]
fn invoice_terminal_statuses(#[case] status: InvoiceStatus, #[case] terminal: bool) {
    assert_eq!(status.is_terminal(), terminal);
}

#[rstest]
#[case(OfferStatus::Draft, OfferStatus::Sent, true)]
#[case(OfferStatus::Draft, OfferStatus::Accepted, false)]
#[case(OfferStatus::Draft, OfferStatus::Declined, false)]
#[case(OfferStatus::Sent, OfferStatus::Accepted, true)]
#[case(OfferStatus::Sent, OfferStatus::Declined, true)]
#[case(OfferStatus::Sent, OfferStatus::Draft, false)]
#[case(OfferStatus::Accepted, OfferStatus::Declined, false)]
#[case(OfferStatus::Declined, OfferStatus::Accepted, false)]
fn offer_transition_matrix(
    #[case] from: OfferStatus,
    #[case] to: OfferStatus,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[rstest]
#[case(InvoiceStatus::Draft, "draft")]
#[case(InvoiceStatus::Sent, "sent")]
#[case(InvoiceStatus::Paid, "paid")]
#[case(InvoiceStatus::Overdue, "overdue")]
#[case(InvoiceStatus::Cancelled, "cancelled")]
fn invoice_status_round_trips(#[case] status: InvoiceStatus, #[case] stored: &str) {
    assert_eq!(status.as_str(), stored);
    assert_eq!(InvoiceStatus::try_from(stored).expect("parses"), status);
}

#[rstest]
#[case(OfferStatus::Draft, "draft")]
#[case(OfferStatus::Sent, "sent")]
#[case(OfferStatus::Accepted, "accepted")]
#[case(OfferStatus::Declined, "declined")]
fn offer_status_round_trips(#[case] status: OfferStatus, #[case] stored: &str) {
    assert_eq!(status.as_str(), stored);
    assert_eq!(OfferStatus::try_from(stored).expect("parses"), status);
}
