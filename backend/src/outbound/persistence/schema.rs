//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When migrations
//! change, regenerate with `diesel print-schema` or edit by hand.

diesel::table! {
    /// Profiles keyed by the identity provider's subject.
    users (id) {
        id -> Text,
        email -> Text,
        name -> Nullable<Text>,
        role -> Text,
        company_name -> Nullable<Text>,
        company_website -> Nullable<Text>,
        bio -> Nullable<Text>,
        skills -> Array<Text>,
        gender -> Nullable<Text>,
        date_of_birth -> Nullable<Date>,
        phone -> Nullable<Text>,
        address -> Nullable<Text>,
        desired_job_title -> Nullable<Text>,
        preferred_category -> Nullable<Text>,
        preferred_location -> Nullable<Text>,
        expected_salary -> Nullable<Text>,
        job_type_preference -> Nullable<Text>,
        education -> Jsonb,
        experience -> Jsonb,
        resume_public_id -> Nullable<Text>,
        resume_url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job postings and their lifecycle state.
    jobs (id) {
        id -> Uuid,
        recruiter_id -> Text,
        recruiter_email -> Text,
        company_name -> Text,
        title -> Text,
        description -> Text,
        responsibilities -> Array<Text>,
        requirements -> Array<Text>,
        category -> Text,
        job_type -> Text,
        location -> Text,
        salary_min -> Nullable<Int4>,
        salary_max -> Nullable<Int4>,
        salary_currency -> Nullable<Text>,
        salary_negotiable -> Bool,
        seniority_level -> Text,
        status -> Text,
        published_at -> Nullable<Timestamptz>,
        closed_at -> Nullable<Timestamptz>,
        views -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One application per (job, seeker) pair.
    applications (id) {
        id -> Uuid,
        job_id -> Uuid,
        seeker_id -> Text,
        cover_letter -> Text,
        expected_joining_date -> Nullable<Date>,
        expected_salary -> Nullable<Text>,
        status -> Text,
        applied_at -> Timestamptz,
        decided_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Seeker bookmarks; `job_id` deliberately has no foreign key.
    saved_jobs (user_id, job_id) {
        user_id -> Text,
        job_id -> Uuid,
        job_title -> Text,
        company_name -> Text,
        saved_at -> Timestamptz,
    }
}

diesel::joinable!(jobs -> users (recruiter_id));
diesel::joinable!(applications -> jobs (job_id));

diesel::allow_tables_to_appear_in_same_query!(users, jobs, applications, saved_jobs);
