//! Diesel schema for billing persistence.

diesel::table! {
    /// Client receivables and worker payables.
    invoices (id) {
        /// Internal invoice identifier.
        id -> Uuid,
        /// Human-facing invoice number, unique.
        #[max_length = 64]
        number -> Varchar,
        /// Counterparty kind: `client` or `worker`.
        #[max_length = 16]
        party_kind -> Varchar,
        /// Counterparty identifier.
        party_id -> Uuid,
        /// Line items as a JSON array.
        line_items -> Jsonb,
        /// Issue date.
        issued_on -> Date,
        /// Due date.
        due_on -> Date,
        /// Lifecycle status.
        #[max_length = 32]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-client quotes.
    offers (id) {
        /// Internal offer identifier.
        id -> Uuid,
        /// Addressed client.
        client_id -> Uuid,
        /// Offer title.
        #[max_length = 255]
        title -> Varchar,
        /// Line items as a JSON array.
        line_items -> Jsonb,
        /// Last day of validity.
        valid_until -> Date,
        /// Lifecycle status.
        #[max_length = 32]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
