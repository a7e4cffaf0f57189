//! Diesel schema for workflow persistence.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Generated identifier.
        id -> Int8,
        /// Unique login name.
        #[max_length = 50]
        username -> Varchar,
        /// Unique email address.
        #[max_length = 100]
        email -> Varchar,
        /// Optional display name.
        #[max_length = 100]
        display_name -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Areas of focus.
    areas (id) {
        /// Generated identifier.
        id -> Int8,
        /// Owning user.
        user_id -> Int8,
        /// Area name.
        #[max_length = 100]
        name -> Varchar,
        /// Optional description.
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Situational contexts.
    contexts (id) {
        /// Generated identifier.
        id -> Int8,
        /// Owning user.
        user_id -> Int8,
        /// Context name.
        #[max_length = 100]
        name -> Varchar,
        /// Optional description.
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Whether the context names a physical place.
        is_location -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reference material.
    reference_items (id) {
        /// Generated identifier.
        id -> Int8,
        /// Owning user.
        user_id -> Int8,
        /// Reference title.
        title -> Text,
        /// Optional body text.
        body -> Nullable<Text>,
        /// Optional link.
        url -> Nullable<Text>,
        /// Optional file location hint.
        file_hint -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task labels.
    tags (id) {
        /// Generated identifier.
        id -> Int8,
        /// Owning user.
        user_id -> Int8,
        /// Tag name.
        #[max_length = 50]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Multi-step outcomes.
    projects (id) {
        /// Generated identifier.
        id -> Int8,
        /// Owning user.
        user_id -> Int8,
        /// Optional grouping area.
        area_id -> Nullable<Int8>,
        /// Project title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional outcome statement.
        #[max_length = 500]
        outcome -> Nullable<Varchar>,
        /// Optional notes.
        #[max_length = 2000]
        notes -> Nullable<Varchar>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Completion timestamp, set only while completed.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Actionable tasks.
    tasks (id) {
        /// Generated identifier.
        id -> Int8,
        /// Owning user.
        user_id -> Int8,
        /// Optional project.
        project_id -> Nullable<Int8>,
        /// Optional context.
        context_id -> Nullable<Int8>,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Optional notes.
        #[max_length = 2000]
        notes -> Nullable<Varchar>,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional priority.
        priority -> Nullable<Int4>,
        /// Optional energy level.
        energy -> Nullable<Int4>,
        /// Optional duration estimate in minutes.
        duration_est_min -> Nullable<Int4>,
        /// Optional due timestamp.
        due_at -> Nullable<Timestamptz>,
        /// Optional defer-until timestamp.
        defer_until -> Nullable<Timestamptz>,
        /// Optional waited-on party.
        #[max_length = 200]
        waiting_on -> Nullable<Varchar>,
        /// Optional waiting start.
        waiting_since -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Optional completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Optional manual ordering key.
        order_index -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Directed dependency edges between tasks.
    task_dependencies (task_id, depends_on_task_id) {
        /// Dependent task.
        task_id -> Int8,
        /// Prerequisite task.
        depends_on_task_id -> Int8,
    }
}

diesel::table! {
    /// Task-to-tag links.
    task_tags (task_id, tag_id) {
        /// Tagged task.
        task_id -> Int8,
        /// Applied tag.
        tag_id -> Int8,
    }
}
