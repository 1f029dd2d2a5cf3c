//! Diesel schema for task persistence.

diesel::table! {
    /// Units of work owned by a client.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning client.
        client_id -> Uuid,
        /// Optional owning project.
        project_id -> Nullable<Uuid>,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_on -> Nullable<Date>,
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
    /// Worker-to-task assignment links.
    task_assignments (task_id, user_id) {
        /// Assigned task.
        task_id -> Uuid,
        /// Assigned worker.
        user_id -> Uuid,
        /// Assignment timestamp.
        assigned_at -> Timestamptz,
    }
}

diesel::joinable!(task_assignments -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_assignments);
