//! User data model.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Error;
use super::auth::{CredentialError, PASSWORD_MIN, Password};

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    NameTooLong { max: usize },
    EmptyEmail,
    EmailTooLong { max: usize },
    InvalidEmail,
    UnknownRole { value: String },
    EmptyStudentId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must look like name@example.edu"),
            Self::UnknownRole { value } => {
                write!(f, "role must be `admin` or `student`, got `{value}`")
            }
            Self::EmptyStudentId => write!(f, "student id must not be empty when provided"),
        }
    }
}

impl std::error::Error for UserValidationError {}

impl From<UserValidationError> for Error {
    fn from(err: UserValidationError) -> Self {
        Error::invalid_request(err.to_string())
    }
}

/// Store-generated user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw row identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw row identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a full name.
pub const NAME_MAX: usize = 64;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 254;

/// Person's name as entered at signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a [`FullName`]. Surrounding whitespace is trimmed.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl FullName {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

impl TryFrom<String> for FullName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Length is enforced separately; this only checks the overall shape.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Login email address; unique across users.
///
/// Stored exactly as entered apart from surrounding whitespace, so lookups
/// match on the trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Dining staff: views statistics and publishes menus.
    Admin,
    /// Student: submits ratings and tracks a streak.
    Student,
}

impl Role {
    /// Persisted representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Campus student number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentId(String);

impl StudentId {
    /// Validate and construct a [`StudentId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyStudentId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl StudentId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<StudentId> for String {
    fn from(value: StudentId) -> Self {
        value.0
    }
}

impl TryFrom<String> for StudentId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Descriptive fields shared by new and stored users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    name: FullName,
    email: EmailAddress,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    student_id: Option<StudentId>,
}

impl UserProfile {
    /// Build a profile from validated components.
    pub fn new(
        name: FullName,
        email: EmailAddress,
        role: Role,
        student_id: Option<StudentId>,
    ) -> Self {
        Self {
            name,
            email,
            role,
            student_id,
        }
    }

    /// Validate raw strings into a profile.
    ///
    /// A blank `student_id` is treated as absent.
    pub fn try_from_strings(
        name: &str,
        email: &str,
        role: &str,
        student_id: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let student_id = student_id
            .filter(|value| !value.trim().is_empty())
            .map(StudentId::new)
            .transpose()?;
        Ok(Self::new(
            FullName::new(name)?,
            EmailAddress::new(email)?,
            role.parse()?,
            student_id,
        ))
    }

    pub fn name(&self) -> &FullName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn student_id(&self) -> Option<&StudentId> {
        self.student_id.as_ref()
    }
}

/// Application user as read back from the store.
///
/// ## Invariants
/// - `id` was generated by the store.
/// - The password hash never leaves the persistence boundary on this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    #[serde(flatten)]
    profile: UserProfile,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, profile: UserProfile) -> Self {
        Self { id, profile }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Descriptive fields.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn name(&self) -> &FullName {
        self.profile.name()
    }

    pub fn email(&self) -> &EmailAddress {
        self.profile.email()
    }

    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn student_id(&self) -> Option<&StudentId> {
        self.profile.student_id()
    }
}

/// Signup request: the profile plus the secret chosen by the user.
#[derive(Debug)]
pub struct NewUser {
    profile: UserProfile,
    password: Password,
}

impl NewUser {
    /// Pair a profile with its password.
    ///
    /// Signup passwords need at least [`PASSWORD_MIN`] characters. Sign-in
    /// accepts any non-empty password so older accounts can still log in.
    pub fn new(profile: UserProfile, password: Password) -> Result<Self, CredentialError> {
        if password.char_count() < PASSWORD_MIN {
            return Err(CredentialError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self { profile, password })
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[cfg(test)]
mod tests;
