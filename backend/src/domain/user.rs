//! User data model.
//!
//! Raw input becomes a [`UserDraft`] only through
//! [`UserDraft::try_from_parts`], which validates every field. A stored
//! [`User`] never carries the password: it is write-only input that is wiped
//! from memory once the draft is dropped.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use zeroize::Zeroizing;

use crate::domain::validation::{ValidationErrors, ViolationCode};

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 50;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 254;
/// Maximum allowed length for the part of an email address before `@`.
pub const EMAIL_LOCAL_MAX: usize = 64;
/// Minimum allowed length for a password.
pub const PASSWORD_MIN: usize = 8;
/// Maximum allowed length for a password.
pub const PASSWORD_MAX: usize = 100;

/// Validation errors for user fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Username is empty or whitespace.
    EmptyUsername,
    /// Username is shorter than the minimum.
    UsernameTooShort {
        /// Minimum number of characters.
        min: usize,
    },
    /// Username is longer than the maximum.
    UsernameTooLong {
        /// Maximum number of characters.
        max: usize,
    },
    /// Username contains characters outside `[A-Za-z0-9_]`.
    UsernameInvalidCharacters,
    /// Email is empty or whitespace.
    EmptyEmail,
    /// Email is longer than the maximum.
    EmailTooLong {
        /// Maximum number of characters.
        max: usize,
    },
    /// Email local part is longer than the maximum.
    EmailLocalPartTooLong {
        /// Maximum number of characters before `@`.
        max: usize,
    },
    /// Email is not a syntactically valid address.
    InvalidEmail,
    /// Password is shorter than the minimum.
    PasswordTooShort {
        /// Minimum number of characters.
        min: usize,
    },
    /// Password is longer than the maximum.
    PasswordTooLong {
        /// Maximum number of characters.
        max: usize,
    },
    /// Password contains characters other than ASCII letters and digits.
    PasswordInvalidCharacters,
    /// Password lacks a letter or a digit.
    PasswordTooWeak,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username must contain only alphanumeric characters and underscores",
            ),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmailLocalPartTooLong { max } => {
                write!(f, "email local part must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} characters")
            }
            Self::PasswordInvalidCharacters => {
                write!(f, "password may only contain letters and numbers")
            }
            Self::PasswordTooWeak => write!(
                f,
                "password must contain at least one letter and one number"
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

impl ViolationCode for UserValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::EmptyEmail => "empty",
            Self::UsernameTooShort { .. } | Self::PasswordTooShort { .. } => "too_short",
            Self::UsernameTooLong { .. }
            | Self::EmailTooLong { .. }
            | Self::EmailLocalPartTooLong { .. }
            | Self::PasswordTooLong { .. } => "too_long",
            Self::UsernameInvalidCharacters | Self::PasswordInvalidCharacters => {
                "invalid_characters"
            }
            Self::InvalidEmail => "invalid_format",
            Self::PasswordTooWeak => "too_weak",
        }
    }
}

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9_]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = concat!(
            // Dot-atom local part: no leading, trailing or doubled dots.
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
            r"@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
            r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        );
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Unique login handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }

        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(&username) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Syntactically valid email address.
///
/// The domain is stored lowercased so addresses differing only in domain case
/// compare equal. The local part is kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        let Some((local, domain)) = email.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.chars().count() > EMAIL_LOCAL_MAX {
            return Err(UserValidationError::EmailLocalPartTooLong {
                max: EMAIL_LOCAL_MAX,
            });
        }
        Ok(Self(format!("{local}@{}", domain.to_ascii_lowercase())))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Write-only password input.
///
/// Only ASCII letters and digits are accepted, with at least one of each.
/// The buffer is zeroed on drop and `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`].
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = Zeroizing::new(password.into());
        let length = password.chars().count();
        if length < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(UserValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(UserValidationError::PasswordInvalidCharacters);
        }
        let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if !(has_letter && has_digit) {
            return Err(UserValidationError::PasswordTooWeak);
        }
        Ok(Self(password))
    }

    /// Borrow the secret. Callers must not log or persist it.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Validated input for creating or fully replacing a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    username: Username,
    email: EmailAddress,
    password: Password,
}

impl UserDraft {
    /// Validate raw input, collecting a violation for every invalid field.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::UserDraft;
    ///
    /// let draft = UserDraft::try_from_parts("ada_l", "ada@example.com", "Password123")
    ///     .expect("valid input");
    /// assert_eq!(draft.username().as_ref(), "ada_l");
    ///
    /// let errors = UserDraft::try_from_parts("tu", "not-an-email", "short")
    ///     .expect_err("invalid input");
    /// assert_eq!(errors.errors().len(), 3);
    /// ```
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let username = errors.check("username", Username::new(username));
        let email = errors.check("email", EmailAddress::new(email));
        let password = errors.check("password", Password::new(password));

        match (username, email, password) {
            (Some(username), Some(email), Some(password)) => Ok(Self {
                username,
                email,
                password,
            }),
            _ => Err(errors),
        }
    }

    /// Validated username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Validated email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Validated password; never stored.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Stored user record.
///
/// ## Invariants
/// - `username` and `email` satisfy the same rules as [`UserDraft`].
/// - `created_at` is assigned by storage and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(
        id: UserId,
        username: Username,
        email: EmailAddress,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            created_at,
        }
    }

    /// Rebuild a [`User`] from stored column values, re-checking invariants.
    pub fn try_from_stored(
        id: i32,
        username: String,
        email: String,
        created_at: DateTime<Utc>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id),
            Username::new(username)?,
            EmailAddress::new(email)?,
            created_at,
        ))
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login handle.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address, unique across users.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
