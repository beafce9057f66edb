//! Account registration and sign-in.
//!
//! Passwords are hashed and verified on Tokio's blocking pool because
//! Argon2 is deliberately expensive.

use std::sync::Arc;

use tokio::task;
use tracing::{debug, info, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, Error, LoginCredentials, NewUser, Password, PasswordHash, Role, User, UserId,
};

/// Domain service for user accounts.
#[derive(Clone)]
pub struct AccountsService<U> {
    users: Arc<U>,
}

impl<U> AccountsService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict("email already registered"),
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::CorruptRecord { message } => {
            warn!(%message, "stored user row failed validation");
            Error::internal(format!("stored user is invalid: {message}"))
        }
    }
}

async fn hash_password(password: Password) -> Result<PasswordHash, Error> {
    task::spawn_blocking(move || PasswordHash::create(&password))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(Error::from)
}

async fn verify_password(hash: PasswordHash, password: Password) -> Result<bool, Error> {
    task::spawn_blocking(move || hash.verify(&password))
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
}

impl<U> AccountsService<U>
where
    U: UserRepository,
{
    /// Create an account. The password is stored only as a salted hash.
    ///
    /// A second account with the same email fails with
    /// [`ErrorCode::Conflict`](crate::domain::ErrorCode::Conflict).
    pub async fn register(&self, new_user: NewUser) -> Result<UserId, Error> {
        let hash = hash_password(new_user.password().clone()).await?;
        let id = self
            .users
            .insert(new_user.profile(), &hash)
            .await
            .map_err(map_user_error)?;
        info!(user_id = %id, role = %new_user.profile().role(), "user registered");
        Ok(id)
    }

    /// Look up an account. A missing account is `Ok(None)`.
    pub async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, Error> {
        let stored = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_user_error)?;
        debug!(found = stored.is_some(), "user lookup by email");
        Ok(stored.map(|stored| stored.user))
    }

    /// Return the account when the password matches, `None` otherwise.
    ///
    /// Unknown emails, wrong passwords and unreadable stored hashes are all
    /// reported as `None`.
    pub async fn validate_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, Error> {
        let Some(stored) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!("credential check for unknown email");
            return Ok(None);
        };

        let hash = match PasswordHash::from_phc(stored.password_hash) {
            Ok(hash) => hash,
            Err(err) => {
                warn!(user_id = %stored.user.id(), error = %err, "stored password hash is unreadable");
                return Ok(None);
            }
        };

        let matches = verify_password(hash, credentials.password().clone()).await?;
        debug!(user_id = %stored.user.id(), matches, "credential check");
        Ok(matches.then_some(stored.user))
    }

    /// Sign in to the screen reserved for `role`.
    pub async fn login(&self, credentials: &LoginCredentials, role: Role) -> Result<User, Error> {
        match self.validate_credentials(credentials).await? {
            Some(user) if user.role() == role => {
                info!(user_id = %user.id(), %role, "user signed in");
                Ok(user)
            }
            _ => {
                let article = match role {
                    Role::Admin => "an",
                    Role::Student => "a",
                };
                Err(Error::unauthorized(format!(
                    "invalid credentials or not {article} {role} account"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for the accounts service.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockUserRepository, StoredUser};
    use crate::domain::{UserProfile, UserValidationError};
    use rstest::{fixture, rstest};

    fn make_service(repo: MockUserRepository) -> AccountsService<MockUserRepository> {
        AccountsService::new(Arc::new(repo))
    }

    #[fixture]
    fn profile() -> UserProfile {
        UserProfile::try_from_strings("Ada Student", "ada@campus.edu", "student", Some("S-1"))
            .expect("valid profile")
    }

    fn stored(profile: UserProfile, password: &str) -> StoredUser {
        let password = Password::new(password).expect("password");
        StoredUser {
            user: User::new(UserId::new(7), profile),
            password_hash: PasswordHash::create(&password)
                .expect("hash")
                .as_phc()
                .to_owned(),
        }
    }

    fn credentials(password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts("ada@campus.edu", password).expect("credentials")
    }

    #[rstest]
    #[tokio::test]
    async fn register_stores_a_hash_not_the_password(profile: UserProfile) {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .withf(|_, hash| {
                hash.as_phc().starts_with("$argon2id$")
                    && hash.verify(&Password::new("hunter22").expect("password"))
            })
            .times(1)
            .return_once(|_, _| Ok(UserId::new(1)));

        let new_user = NewUser::new(profile, Password::new("hunter22").expect("password"))
            .expect("new user");
        let id = make_service(repo)
            .register(new_user)
            .await
            .expect("registration succeeds");
        assert_eq!(id, UserId::new(1));
    }

    #[rstest]
    #[case(UserPersistenceError::duplicate_email("ada@campus.edu"), ErrorCode::Conflict)]
    #[case(UserPersistenceError::connection("database is locked"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("disk I/O error"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn register_maps_repository_errors(
        profile: UserProfile,
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .times(1)
            .return_once(move |_, _| Err(failure));

        let new_user = NewUser::new(profile, Password::new("hunter22").expect("password"))
            .expect("new user");
        let err = make_service(repo)
            .register(new_user)
            .await
            .expect_err("registration fails");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_uses_registered_message(profile: UserProfile) {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .return_once(|_, _| Err(UserPersistenceError::duplicate_email("ada@campus.edu")));

        let new_user = NewUser::new(profile, Password::new("hunter22").expect("password"))
            .expect("new user");
        let err = make_service(repo)
            .register(new_user)
            .await
            .expect_err("duplicate");
        assert_eq!(err.message(), "email already registered");
        assert_eq!(err.user_message(), "This email is already registered.");
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_email_returns_none_when_absent() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().return_once(|_| Ok(None));

        let email = EmailAddress::new("nobody@campus.edu").expect("email");
        let found = make_service(repo)
            .find_by_email(&email)
            .await
            .expect("lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn validate_credentials_accepts_matching_password(profile: UserProfile) {
        let record = stored(profile, "hunter22");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email.to_string() == "ada@campus.edu")
            .return_once(move |_| Ok(Some(record)));

        let user = make_service(repo)
            .validate_credentials(&credentials("hunter22"))
            .await
            .expect("check succeeds")
            .expect("user returned");
        assert_eq!(user.id(), UserId::new(7));
    }

    #[rstest]
    #[tokio::test]
    async fn validate_credentials_rejects_wrong_password(profile: UserProfile) {
        let record = stored(profile, "hunter22");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .return_once(move |_| Ok(Some(record)));

        let user = make_service(repo)
            .validate_credentials(&credentials("hunter23"))
            .await
            .expect("check succeeds");
        assert!(user.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn validate_credentials_treats_legacy_plaintext_as_mismatch(profile: UserProfile) {
        let record = StoredUser {
            user: User::new(UserId::new(7), profile),
            password_hash: "hunter22".to_owned(),
        };
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .return_once(move |_| Ok(Some(record)));

        let user = make_service(repo)
            .validate_credentials(&credentials("hunter22"))
            .await
            .expect("check succeeds");
        assert!(user.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn corrupt_rows_surface_as_internal_errors() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().return_once(|_| {
            Err(UserPersistenceError::corrupt_record(
                UserValidationError::UnknownRole {
                    value: "chef".to_owned(),
                }
                .to_string(),
            ))
        });

        let err = make_service(repo)
            .validate_credentials(&credentials("hunter22"))
            .await
            .expect_err("corrupt row");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[case::student_on_admin_screen("student", Role::Admin, "invalid credentials or not an admin account")]
    #[case::admin_on_student_screen("admin", Role::Student, "invalid credentials or not a student account")]
    #[tokio::test]
    async fn login_requires_the_expected_role(
        #[case] stored_role: &str,
        #[case] screen: Role,
        #[case] expected: &str,
    ) {
        let profile =
            UserProfile::try_from_strings("Ada Student", "ada@campus.edu", stored_role, None)
                .expect("valid profile");
        let record = stored(profile, "hunter22");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .return_once(move |_| Ok(Some(record)));

        let err = make_service(repo)
            .login(&credentials("hunter22"), screen)
            .await
            .expect_err("role mismatch is rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn login_returns_the_user_for_matching_role(profile: UserProfile) {
        let record = stored(profile, "hunter22");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .return_once(move |_| Ok(Some(record)));

        let user = make_service(repo)
            .login(&credentials("hunter22"), Role::Student)
            .await
            .expect("login succeeds");
        assert_eq!(user.role(), Role::Student);
    }
}
