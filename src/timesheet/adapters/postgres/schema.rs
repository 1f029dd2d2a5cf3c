//! Diesel table definitions for timesheet persistence.

diesel::table! {
    /// Logged worker minutes against tasks.
    timesheet_entries (id) {
        /// Internal entry identifier.
        id -> Uuid,
        /// Logging worker.
        worker_id -> Uuid,
        /// Target task.
        task_id -> Uuid,
        /// Date the work was performed.
        work_date -> Date,
        /// Logged minutes.
        minutes -> Int4,
        /// Free-form note.
        note -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
