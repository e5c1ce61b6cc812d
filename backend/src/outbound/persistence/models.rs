//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversions to domain entities live in the repository adapter.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{basics, educations, experiences, profiles, projects, skills, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by the partial account update. `None` fields are left
/// untouched by Diesel; `updated_at` is always refreshed.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    #[expect(dead_code, reason = "FK is only used in query filters")]
    pub user_id: Uuid,
    pub bio: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating profile records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: &'a str,
    pub image: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for profile mutations.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = profiles)]
pub(crate) struct ProfileChangeset<'a> {
    pub bio: Option<&'a str>,
    pub image: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the basics table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = basics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BasicRow {
    pub id: Uuid,
    #[expect(dead_code, reason = "FK is only used in query filters")]
    pub profile_id: Uuid,
    pub dob: NaiveDate,
    pub phone: String,
    pub alternate_phone: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub interest: String,
    pub website: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating basic records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = basics)]
pub(crate) struct NewBasicRow<'a> {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub dob: NaiveDate,
    pub phone: &'a str,
    pub alternate_phone: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub country: &'a str,
    pub interest: &'a str,
    pub website: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the experiences table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = experiences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExperienceRow {
    pub id: Uuid,
    #[expect(dead_code, reason = "FK is only used in query filters")]
    pub profile_id: Uuid,
    pub designation: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating experience records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = experiences)]
pub(crate) struct NewExperienceRow<'a> {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub designation: &'a str,
    pub company: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the educations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = educations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EducationRow {
    pub id: Uuid,
    #[expect(dead_code, reason = "FK is only used in query filters")]
    pub profile_id: Uuid,
    pub education_level: String,
    pub branch: String,
    pub institute: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating education records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = educations)]
pub(crate) struct NewEducationRow<'a> {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub education_level: &'a str,
    pub branch: &'a str,
    pub institute: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the skills table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SkillRow {
    pub id: Uuid,
    #[expect(dead_code, reason = "FK is only used in query filters")]
    pub profile_id: Uuid,
    pub skill: String,
    pub last_used: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating skill records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = skills)]
pub(crate) struct NewSkillRow<'a> {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub skill: &'a str,
    pub last_used: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the projects table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    #[expect(dead_code, reason = "FK is only used in query filters")]
    pub profile_id: Uuid,
    pub headline: String,
    pub description: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub ptype: String,
    pub extra_info: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub headline: &'a str,
    pub description: &'a str,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub ptype: &'a str,
    pub extra_info: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
