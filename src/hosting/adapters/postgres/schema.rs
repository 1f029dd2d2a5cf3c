//! Diesel schema for hosting persistence.

diesel::table! {
    /// Registrar metadata for client-owned domains.
    domain_records (id) {
        /// Internal record identifier.
        id -> Uuid,
        /// Owning client.
        client_id -> Uuid,
        /// Domain name in label format.
        #[max_length = 255]
        name -> Varchar,
        /// Registrar label.
        #[max_length = 255]
        registrar -> Nullable<Varchar>,
        /// Registration expiry of the domain itself.
        domain_expires_on -> Date,
        /// Hosting contract expiry.
        hosting_expires_on -> Nullable<Date>,
        /// SSL certificate expiry.
        ssl_expires_on -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
