//! Diesel schema for task persistence.

diesel::table! {
    /// Work items recorded by users.
    tasks (id) {
        /// Task identifier.
        id -> Int8,
        /// Title.
        #[max_length = 255]
        title -> Varchar,
        /// Base64 AES-GCM envelope of the summary.
        summary -> Text,
        /// When the work was performed.
        performed_at -> Timestamptz,
        /// Owning user.
        owner_id -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
