//! Authentication primitives: passwords, password hashes and login
//! credentials.
//!
//! Passwords are accepted as zeroizing secrets and only ever persisted as
//! salted Argon2id hashes in PHC string form. Verification goes through
//! Argon2's constant-time comparison.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use super::Error;
use super::user::{EmailAddress, UserValidationError};

/// Shortest password accepted at signup.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Password was empty.
    EmptyPassword,
    /// Signup password shorter than [`PASSWORD_MIN`] characters.
    PasswordTooShort { min: usize },
    /// Email failed validation.
    InvalidEmail(UserValidationError),
    /// Hashing failed inside the Argon2 implementation.
    Hashing { message: String },
    /// A stored hash is not a valid PHC string.
    MalformedHash { message: String },
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters long")
            }
            Self::InvalidEmail(err) => write!(f, "{err}"),
            Self::Hashing { message } => write!(f, "password hashing failed: {message}"),
            Self::MalformedHash { message } => write!(f, "stored password hash is invalid: {message}"),
        }
    }
}

impl std::error::Error for CredentialError {}

impl From<CredentialError> for Error {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::EmptyPassword
            | CredentialError::PasswordTooShort { .. }
            | CredentialError::InvalidEmail(_) => {
                Error::invalid_request(err.to_string())
            }
            CredentialError::Hashing { .. } | CredentialError::MalformedHash { .. } => {
                Error::internal(err.to_string())
            }
        }
    }
}

/// Plaintext password held only as long as needed.
///
/// The buffer is wiped on drop and the `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept a password. Whitespace is preserved so the secret is compared
    /// exactly as typed.
    pub fn new(password: impl Into<String>) -> Result<Self, CredentialError> {
        let password = Zeroizing::new(password.into());
        if password.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }
        Ok(Self(password))
    }

    pub(crate) fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Argon2id password hash in PHC string form.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn create(password: &Password) -> Result<Self, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| CredentialError::Hashing {
                message: err.to_string(),
            })?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap a stored PHC string after checking that it parses.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, CredentialError> {
        let phc = phc.into();
        PhcString::new(&phc).map_err(|err| CredentialError::MalformedHash {
            message: err.to_string(),
        })?;
        Ok(Self(phc))
    }

    /// Check `password` against this hash.
    pub fn verify(&self, password: &Password) -> bool {
        match PhcString::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// PHC string suitable for persistence.
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `email` is a valid, trimmed [`EmailAddress`].
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use forkast::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@campus.edu ", "pw").unwrap();
/// assert_eq!(creds.email().to_string(), "ada@campus.edu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialError> {
        let email = EmailAddress::new(email).map_err(CredentialError::InvalidEmail)?;
        let password = Password::new(password)?;
        Ok(Self { email, password })
    }

    /// Email used for the user lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw")]
    #[case("   ", "pw")]
    #[case("not-an-email", "pw")]
    fn invalid_emails_are_rejected(#[case] email: &str, #[case] password: &str) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert!(matches!(err, CredentialError::InvalidEmail(_)));
    }

    #[rstest]
    fn empty_password_is_rejected() {
        let err = LoginCredentials::try_from_parts("ada@campus.edu", "")
            .expect_err("empty password must fail");
        assert_eq!(err, CredentialError::EmptyPassword);
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2").expect("valid password");
        assert_eq!(format!("{password:?}"), "Password(<redacted>)");
    }

    #[rstest]
    fn hash_verifies_only_the_original_password() {
        let password = Password::new("correct horse").expect("valid password");
        let hash = PasswordHash::create(&password).expect("hash");

        assert!(hash.as_phc().starts_with("$argon2id$"));
        assert!(hash.verify(&password));
        assert!(!hash.verify(&Password::new("correct horse ").expect("valid password")));
    }

    #[rstest]
    fn hashing_twice_uses_distinct_salts() {
        let password = Password::new("same secret").expect("valid password");
        let first = PasswordHash::create(&password).expect("hash");
        let second = PasswordHash::create(&password).expect("hash");

        assert_ne!(first, second);
    }

    #[rstest]
    fn from_phc_rejects_plaintext() {
        let err = PasswordHash::from_phc("password123").expect_err("plaintext is not a hash");
        assert!(matches!(err, CredentialError::MalformedHash { .. }));
    }

    #[rstest]
    fn from_phc_accepts_created_hashes() {
        let password = Password::new("pw").expect("valid password");
        let hash = PasswordHash::create(&password).expect("hash");
        let restored = PasswordHash::from_phc(hash.as_phc()).expect("parse stored hash");

        assert!(restored.verify(&password));
    }
}
