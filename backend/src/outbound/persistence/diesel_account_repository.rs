//! PostgreSQL-backed [`AccountRepository`] implementation using Diesel.
//!
//! Registration inserts the user row and provisions the default profile
//! graph inside one transaction, so a failure at any step rolls the whole
//! account back. Deletes rely on `ON DELETE CASCADE` foreign keys to remove
//! the graph with its owning user.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{AccountPersistenceError, AccountRepository, NewAccount};
use crate::domain::{
    Basic, Education, Email, Experience, IndianState, PasswordHash, Profile, ProfileGraph,
    Project, ProjectType, Skill, User, UserPatch, Username,
};

use super::models::{
    BasicRow, EducationRow, ExperienceRow, NewBasicRow, NewEducationRow, NewExperienceRow,
    NewProfileRow, NewProjectRow, NewSkillRow, NewUserRow, ProfileChangeset, ProfileRow,
    ProjectRow, SkillRow, UserChangeset, UserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{basics, educations, experiences, profiles, projects, skills, users};

/// Diesel-backed implementation of the [`AccountRepository`] port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AccountPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> AccountPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name().unwrap_or_default();
            debug!(constraint, "unique constraint rejected account write");
            // Constraint names come from the migration: users_username_key,
            // users_email_key.
            if constraint.contains("email") {
                return AccountPersistenceError::duplicate("email");
            }
            if constraint.contains("username") {
                return AccountPersistenceError::duplicate("username");
            }
            AccountPersistenceError::query("unique constraint violation")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "database connection closed");
            AccountPersistenceError::connection("database connection error")
        }
        _ => {
            debug!(error = %error, "diesel operation failed");
            AccountPersistenceError::query("database error")
        }
    }
}

fn row_to_user(row: UserRow) -> Result<User, AccountPersistenceError> {
    let username = Username::new(row.username)
        .map_err(|err| AccountPersistenceError::query(format!("stored username invalid: {err}")))?;
    let email = Email::new(row.email)
        .map_err(|err| AccountPersistenceError::query(format!("stored email invalid: {err}")))?;
    Ok(User {
        id: row.id,
        username,
        email,
        password_hash: PasswordHash::from_stored(row.password_hash),
        is_active: row.is_active,
        is_staff: row.is_staff,
        is_superuser: row.is_superuser,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_profile(row: ProfileRow) -> Profile {
    Profile {
        id: row.id,
        bio: row.bio,
        image: row.image,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn row_to_basic(row: BasicRow) -> Basic {
    let state = IndianState::parse(&row.state).unwrap_or_else(|| {
        tracing::warn!(value = row.state, "unrecognised state value, defaulting to Karnataka");
        IndianState::Karnataka
    });
    Basic {
        id: row.id,
        dob: row.dob,
        phone: row.phone,
        alternate_phone: row.alternate_phone,
        city: row.city,
        state,
        country: row.country,
        interest: row.interest,
        website: row.website,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn row_to_experience(row: ExperienceRow) -> Experience {
    Experience {
        id: row.id,
        designation: row.designation,
        company: row.company,
        start_date: row.start_date,
        end_date: row.end_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn row_to_education(row: EducationRow) -> Education {
    Education {
        id: row.id,
        education_level: row.education_level,
        branch: row.branch,
        institute: row.institute,
        start_date: row.start_date,
        end_date: row.end_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn row_to_skill(row: SkillRow) -> Skill {
    Skill {
        id: row.id,
        skill: row.skill,
        last_used: row.last_used,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn row_to_project(row: ProjectRow) -> Project {
    let ptype = ProjectType::parse(&row.ptype).unwrap_or_else(|| {
        tracing::warn!(value = row.ptype, "unrecognised project type, defaulting to Self");
        ProjectType::Personal
    });
    Project {
        id: row.id,
        headline: row.headline,
        description: row.description,
        from_date: row.from_date,
        to_date: row.to_date,
        ptype,
        extra_info: row.extra_info,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Insert the default profile graph for a freshly inserted user.
///
/// Runs inside the caller's transaction; order matches the original
/// provisioning sequence (profile, basic, experience, education, skill,
/// project).
async fn provision_graph(
    conn: &mut AsyncPgConnection,
    user_id: Uuid,
    graph: &ProfileGraph,
) -> Result<(), diesel::result::Error> {
    diesel::insert_into(profiles::table)
        .values(NewProfileRow {
            id: graph.profile.id,
            user_id,
            bio: &graph.profile.bio,
            image: &graph.profile.image,
            created_at: graph.profile.created_at,
            updated_at: graph.profile.updated_at,
        })
        .execute(conn)
        .await?;

    diesel::insert_into(basics::table)
        .values(NewBasicRow {
            id: graph.basic.id,
            profile_id: graph.profile.id,
            dob: graph.basic.dob,
            phone: &graph.basic.phone,
            alternate_phone: &graph.basic.alternate_phone,
            city: &graph.basic.city,
            state: graph.basic.state.as_str(),
            country: &graph.basic.country,
            interest: &graph.basic.interest,
            website: &graph.basic.website,
            created_at: graph.basic.created_at,
            updated_at: graph.basic.updated_at,
        })
        .execute(conn)
        .await?;

    for entry in &graph.experience {
        diesel::insert_into(experiences::table)
            .values(NewExperienceRow {
                id: entry.id,
                profile_id: graph.profile.id,
                designation: &entry.designation,
                company: &entry.company,
                start_date: entry.start_date,
                end_date: entry.end_date,
                created_at: entry.created_at,
                updated_at: entry.updated_at,
            })
            .execute(conn)
            .await?;
    }

    for entry in &graph.education {
        diesel::insert_into(educations::table)
            .values(NewEducationRow {
                id: entry.id,
                profile_id: graph.profile.id,
                education_level: &entry.education_level,
                branch: &entry.branch,
                institute: &entry.institute,
                start_date: entry.start_date,
                end_date: entry.end_date,
                created_at: entry.created_at,
                updated_at: entry.updated_at,
            })
            .execute(conn)
            .await?;
    }

    for entry in &graph.skills {
        diesel::insert_into(skills::table)
            .values(NewSkillRow {
                id: entry.id,
                profile_id: graph.profile.id,
                skill: &entry.skill,
                last_used: entry.last_used,
                created_at: entry.created_at,
                updated_at: entry.updated_at,
            })
            .execute(conn)
            .await?;
    }

    for entry in &graph.projects {
        diesel::insert_into(projects::table)
            .values(NewProjectRow {
                id: entry.id,
                profile_id: graph.profile.id,
                headline: &entry.headline,
                description: &entry.description,
                from_date: entry.from_date,
                to_date: entry.to_date,
                ptype: entry.ptype.as_str(),
                extra_info: &entry.extra_info,
                created_at: entry.created_at,
                updated_at: entry.updated_at,
            })
            .execute(conn)
            .await?;
    }

    Ok(())
}

async fn load_children(
    conn: &mut AsyncPgConnection,
    profile_id: Uuid,
) -> Result<(Vec<ExperienceRow>, Vec<EducationRow>, Vec<SkillRow>, Vec<ProjectRow>), diesel::result::Error>
{
    let experience = experiences::table
        .filter(experiences::profile_id.eq(profile_id))
        .order(experiences::created_at.asc())
        .select(ExperienceRow::as_select())
        .load(conn)
        .await?;
    let education = educations::table
        .filter(educations::profile_id.eq(profile_id))
        .order(educations::created_at.asc())
        .select(EducationRow::as_select())
        .load(conn)
        .await?;
    let skill_rows = skills::table
        .filter(skills::profile_id.eq(profile_id))
        .order(skills::created_at.asc())
        .select(SkillRow::as_select())
        .load(conn)
        .await?;
    let project_rows = projects::table
        .filter(projects::profile_id.eq(profile_id))
        .order(projects::created_at.asc())
        .select(ProjectRow::as_select())
        .load(conn)
        .await?;
    Ok((experience, education, skill_rows, project_rows))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn create_user(&self, account: NewAccount) -> Result<User, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = Utc::now();
        let user_id = Uuid::new_v4();
        let graph = ProfileGraph::provisioned(now);

        let row = conn
            .transaction::<UserRow, diesel::result::Error, _>(|conn| {
                async move {
                    let inserted: UserRow = diesel::insert_into(users::table)
                        .values(NewUserRow {
                            id: user_id,
                            username: account.username.as_str(),
                            email: account.email.as_str(),
                            password_hash: account.password_hash.as_str(),
                            is_active: true,
                            is_staff: account.is_staff,
                            is_superuser: account.is_superuser,
                            created_at: now,
                            updated_at: now,
                        })
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;

                    provision_graph(conn, user_id, &graph).await?;
                    Ok(inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }

    async fn find_user_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<(User, Profile)>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<(UserRow, ProfileRow)> = users::table
            .inner_join(profiles::table)
            .filter(users::id.eq(id))
            .select((UserRow::as_select(), ProfileRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match result {
            Some((user_row, profile_row)) => {
                Ok(Some((row_to_user(user_row)?, row_to_profile(profile_row))))
            }
            None => Ok(None),
        }
    }

    async fn find_user_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<User>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        result.map(row_to_user).transpose()
    }

    async fn find_graph_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<(User, ProfileGraph)>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let head: Option<(UserRow, ProfileRow)> = users::table
            .inner_join(profiles::table)
            .filter(users::username.eq(username.as_str()))
            .select((UserRow::as_select(), ProfileRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some((user_row, profile_row)) = head else {
            return Ok(None);
        };
        let profile_id = profile_row.id;

        let basic_row: Option<BasicRow> = basics::table
            .filter(basics::profile_id.eq(profile_id))
            .select(BasicRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let basic = basic_row.ok_or_else(|| {
            AccountPersistenceError::query("profile graph incomplete: basic record missing")
        })?;

        let (experience, education, skill_rows, project_rows) =
            load_children(&mut conn, profile_id)
                .await
                .map_err(map_diesel_error)?;

        let graph = ProfileGraph {
            profile: row_to_profile(profile_row),
            basic: row_to_basic(basic),
            experience: experience.into_iter().map(row_to_experience).collect(),
            education: education.into_iter().map(row_to_education).collect(),
            skills: skill_rows.into_iter().map(row_to_skill).collect(),
            projects: project_rows.into_iter().map(row_to_project).collect(),
        };
        Ok(Some((row_to_user(user_row)?, graph)))
    }

    async fn update_user(
        &self,
        id: Uuid,
        patch: UserPatch,
    ) -> Result<Option<(User, Profile)>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = Utc::now();

        let result = conn
            .transaction::<Option<(UserRow, ProfileRow)>, diesel::result::Error, _>(|conn| {
                async move {
                    let existing: Option<(UserRow, ProfileRow)> = users::table
                        .inner_join(profiles::table)
                        .filter(users::id.eq(id))
                        .select((UserRow::as_select(), ProfileRow::as_select()))
                        .first(conn)
                        .await
                        .optional()?;
                    let Some((_, profile_row)) = existing else {
                        return Ok(None);
                    };

                    let touches_user = patch.username.is_some()
                        || patch.email.is_some()
                        || patch.password_hash.is_some();
                    if touches_user {
                        diesel::update(users::table.find(id))
                            .set(UserChangeset {
                                username: patch.username.as_ref().map(Username::as_str),
                                email: patch.email.as_ref().map(Email::as_str),
                                password_hash: patch.password_hash.as_ref().map(PasswordHash::as_str),
                                updated_at: now,
                            })
                            .execute(conn)
                            .await?;
                    }

                    let touches_profile = patch.bio.is_some() || patch.image.is_some();
                    if touches_profile {
                        diesel::update(profiles::table.find(profile_row.id))
                            .set(ProfileChangeset {
                                bio: patch.bio.as_deref(),
                                image: patch.image.as_deref(),
                                updated_at: now,
                            })
                            .execute(conn)
                            .await?;
                    }

                    users::table
                        .inner_join(profiles::table)
                        .filter(users::id.eq(id))
                        .select((UserRow::as_select(), ProfileRow::as_select()))
                        .first(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match result {
            Some((user_row, profile_row)) => {
                Ok(Some((row_to_user(user_row)?, row_to_profile(profile_row))))
            }
            None => Ok(None),
        }
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Child rows go with the user via ON DELETE CASCADE.
        let removed = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
