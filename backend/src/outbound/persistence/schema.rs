//! Diesel table definitions matching `backend/migrations`.
//!
//! Regenerate with `diesel print-schema` when migrations change.

diesel::table! {
    /// Registered users. `email` carries a unique constraint.
    users (id) {
        id -> Int4,
        username -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog posts. `user_id` cascades on user deletion.
    posts (id) {
        id -> Int4,
        title -> Varchar,
        content -> Text,
        user_id -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(posts, users);
