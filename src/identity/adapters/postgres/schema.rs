//! Diesel schema for identity persistence.

diesel::table! {
    /// Portal user accounts.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Normalized email address.
        #[max_length = 255]
        email -> Varchar,
        /// Human-readable display name.
        #[max_length = 255]
        display_name -> Varchar,
        /// Access role.
        #[max_length = 50]
        role -> Varchar,
        /// Client linkage for client-role users.
        client_id -> Nullable<Uuid>,
        /// Salted password digest, absent until activation.
        #[max_length = 255]
        password_hash -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Single-use invite tokens.
    invites (id) {
        /// Internal invite identifier.
        id -> Uuid,
        /// Invited user.
        user_id -> Uuid,
        /// SHA-256 digest of the plaintext token.
        #[max_length = 64]
        token_digest -> Varchar,
        /// Expiry timestamp.
        expires_at -> Timestamptz,
        /// Consumption timestamp, if already used.
        consumed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(invites -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, invites);
