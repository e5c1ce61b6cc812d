//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the migrations under `backend/migrations` exactly; when
//! the migrations change, regenerate with `diesel print-schema` or update by
//! hand.

diesel::table! {
    /// User accounts. `email` is the login identifier; both `email` and
    /// `username` carry unique indexes.
    users (id) {
        id -> Uuid,
        #[max_length = 255]
        username -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 255]
        password_hash -> Varchar,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One profile per user; cascade-deleted with the user.
    profiles (id) {
        id -> Uuid,
        user_id -> Uuid,
        bio -> Text,
        #[max_length = 255]
        image -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One demographic record per profile.
    basics (id) {
        id -> Uuid,
        profile_id -> Uuid,
        dob -> Date,
        #[max_length = 12]
        phone -> Varchar,
        #[max_length = 12]
        alternate_phone -> Varchar,
        #[max_length = 50]
        city -> Varchar,
        #[max_length = 50]
        state -> Varchar,
        #[max_length = 50]
        country -> Varchar,
        #[max_length = 200]
        interest -> Varchar,
        #[max_length = 200]
        website -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Employment entries, many per profile.
    experiences (id) {
        id -> Uuid,
        profile_id -> Uuid,
        #[max_length = 150]
        designation -> Varchar,
        #[max_length = 150]
        company -> Varchar,
        start_date -> Date,
        end_date -> Date,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Education entries, many per profile.
    educations (id) {
        id -> Uuid,
        profile_id -> Uuid,
        #[max_length = 150]
        education_level -> Varchar,
        #[max_length = 150]
        branch -> Varchar,
        #[max_length = 150]
        institute -> Varchar,
        start_date -> Date,
        end_date -> Date,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Skill entries, many per profile.
    skills (id) {
        id -> Uuid,
        profile_id -> Uuid,
        #[max_length = 150]
        skill -> Varchar,
        last_used -> Date,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project entries, many per profile. `ptype` holds a `ProjectType`
    /// label (`Self` or `Institute`).
    projects (id) {
        id -> Uuid,
        profile_id -> Uuid,
        #[max_length = 200]
        headline -> Varchar,
        description -> Text,
        from_date -> Date,
        to_date -> Date,
        #[max_length = 50]
        ptype -> Varchar,
        extra_info -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(profiles -> users (user_id));
diesel::joinable!(basics -> profiles (profile_id));
diesel::joinable!(experiences -> profiles (profile_id));
diesel::joinable!(educations -> profiles (profile_id));
diesel::joinable!(skills -> profiles (profile_id));
diesel::joinable!(projects -> profiles (profile_id));

diesel::allow_tables_to_appear_in_same_query!(
    users, profiles, basics, experiences, educations, skills, projects
);
