//! SQLite-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{StoredUser, UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, PasswordHash, User, UserId, UserProfile};

use super::diesel_error_mapping::{is_unique_violation, map_basic_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(map_pool_error(error))
}

fn map_diesel(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_stored_user(row: UserRow) -> Result<StoredUser, UserPersistenceError> {
    let profile = UserProfile::try_from_strings(
        &row.name,
        &row.email,
        &row.role,
        row.student_id.as_deref(),
    )
    .map_err(|err| {
        UserPersistenceError::corrupt_record(format!("user {}: {err}", row.id))
    })?;
    Ok(StoredUser {
        user: User::new(UserId::new(row.id), profile),
        password_hash: row.password,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        profile: &UserProfile,
        password_hash: &PasswordHash,
    ) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewUserRow {
            name: profile.name().as_str(),
            email: profile.email().as_str(),
            password: password_hash.as_phc(),
            role: profile.role().as_str(),
            student_id: profile.student_id().map(|id| id.as_str()),
        };

        let id: i64 = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if is_unique_violation(&error) {
                    debug!("user insert rejected by unique email constraint");
                    UserPersistenceError::duplicate_email(profile.email().as_str())
                } else {
                    map_diesel(error)
                }
            })?;

        Ok(UserId::new(id))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_stored_user).transpose()
    }
}
