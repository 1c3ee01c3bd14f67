//! Diesel schema for user and role persistence.

diesel::table! {
    /// Role definitions.
    roles (id) {
        /// Role identifier.
        id -> Int8,
        /// Human-readable label.
        #[max_length = 255]
        label -> Varchar,
        /// Authorization discriminant.
        #[max_length = 255]
        slug -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// User accounts.
    users (id) {
        /// User identifier.
        id -> Int8,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Unique, lowercased email address.
        #[max_length = 320]
        email -> Varchar,
        /// PHC-formatted password digest.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Optional role reference.
        role_id -> Nullable<Int8>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(users -> roles (role_id));
diesel::allow_tables_to_appear_in_same_query!(roles, users);
