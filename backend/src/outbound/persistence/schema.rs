//! Diesel table definitions mirroring `backend/migrations`.

diesel::table! {
    /// Registered students. `email` is unique and stored lowercased.
    students (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        age -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per student holding their subject entries as a JSONB array.
    ///
    /// `student_id` is unique but carries no foreign key; deleting a student
    /// removes its row from the application side.
    marks (id) {
        id -> Uuid,
        student_id -> Uuid,
        subjects -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
