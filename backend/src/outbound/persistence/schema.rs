//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel
//! uses them for compile-time query validation.

diesel::table! {
    /// Known users, recorded at login.
    users (id) {
        /// Primary key: UUID identifier.
        id -> Uuid,
        /// Display name (max 255 characters).
        username -> Varchar,
    }
}

diesel::table! {
    /// Schedules: a named event with a memo, owned by its creator.
    schedules (schedule_id) {
        /// Primary key: UUID identifier.
        schedule_id -> Uuid,
        /// Display name (max 255 characters).
        schedule_name -> Varchar,
        /// Free-text notes.
        memo -> Text,
        /// Creator user id.
        created_by -> Uuid,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Date/time candidates proposed within a schedule.
    candidates (candidate_id) {
        /// Primary key: serial identifier.
        candidate_id -> Int4,
        /// Candidate label as entered.
        candidate_name -> Varchar,
        /// Owning schedule.
        schedule_id -> Uuid,
    }
}

diesel::table! {
    /// Per-candidate attendance answers, one row per (candidate, user).
    availabilities (candidate_id, user_id) {
        /// Candidate the answer refers to.
        candidate_id -> Int4,
        /// Responding user.
        user_id -> Uuid,
        /// Tri-state answer: 0 absent, 1 undecided, 2 attending.
        availability -> Int2,
        /// Owning schedule, denormalised for per-schedule queries.
        schedule_id -> Uuid,
    }
}

diesel::table! {
    /// Comments, one row per (schedule, user).
    comments (schedule_id, user_id) {
        /// Owning schedule.
        schedule_id -> Uuid,
        /// Commenting user.
        user_id -> Uuid,
        /// Comment body (max 255 characters).
        comment -> Varchar,
    }
}

diesel::joinable!(availabilities -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(availabilities, users);
