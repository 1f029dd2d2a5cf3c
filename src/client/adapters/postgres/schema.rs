//! Diesel schema for client and project persistence.

diesel::table! {
    /// Client company records.
    clients (id) {
        /// Internal client identifier.
        id -> Uuid,
        /// Company name.
        #[max_length = 255]
        company_name -> Varchar,
        /// Contact email address.
        #[max_length = 255]
        contact_email -> Varchar,
        /// Contact phone number.
        #[max_length = 50]
        phone -> Nullable<Varchar>,
        /// Postal address.
        address -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects grouping work under one client.
    projects (id) {
        /// Internal project identifier.
        id -> Uuid,
        /// Owning client.
        client_id -> Uuid,
        /// Project name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> clients (client_id));
diesel::allow_tables_to_appear_in_same_query!(clients, projects);
