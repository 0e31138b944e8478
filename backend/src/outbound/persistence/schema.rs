//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// People with their birth dates; ages are never stored.
    people (id) {
        /// Primary key assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Display name, at most 32 characters.
        name -> Varchar,
        /// Date of birth.
        dob -> Date,
    }
}

diesel::table! {
    /// Numbered models.
    models (id) {
        /// Primary key: UUID v4 generated by the application.
        id -> Uuid,
        number -> Int4,
        /// Display name, at most 255 characters.
        name -> Varchar,
        /// Insertion timestamp; the default listing order.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(people, models);
