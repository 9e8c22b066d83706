//! Diesel table definitions.
//!
//! Must match `backend/migrations` column for column.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        /// Stored lowercase and trimmed; unique.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Varchar,
        activated -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    goals (id) {
        id -> Int8,
        user_id -> Uuid,
        goal_text -> Varchar,
        is_completed -> Bool,
        target_date -> Date,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Study sessions. Not to be confused with login sessions, which never
    /// touch the database.
    sessions (id) {
        id -> Int8,
        user_id -> Uuid,
        title -> Varchar,
        description -> Varchar,
        subject -> Varchar,
        start_date -> Date,
        end_date -> Date,
        is_completed -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    quotes (id) {
        id -> Int8,
        user_id -> Uuid,
        content -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(goals -> users (user_id));
diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(quotes -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, goals, sessions, quotes);
