//! Post data model.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::UserId;
use crate::domain::validation::{ValidationErrors, ViolationCode};

/// Minimum allowed length for a post title.
pub const TITLE_MIN: usize = 5;
/// Maximum allowed length for a post title.
pub const TITLE_MAX: usize = 100;
/// Minimum allowed length for post content.
pub const CONTENT_MIN: usize = 10;
/// Maximum allowed length for post content.
pub const CONTENT_MAX: usize = 1000;

const FORBIDDEN_CONTENT: &str = "<script>";

/// Validation errors for post fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// Title is empty or whitespace.
    EmptyTitle,
    /// Title is shorter than the minimum.
    TitleTooShort {
        /// Minimum number of characters.
        min: usize,
    },
    /// Title is longer than the maximum.
    TitleTooLong {
        /// Maximum number of characters.
        max: usize,
    },
    /// Content is shorter than the minimum.
    ContentTooShort {
        /// Minimum number of characters.
        min: usize,
    },
    /// Content is longer than the maximum.
    ContentTooLong {
        /// Maximum number of characters.
        max: usize,
    },
    /// Content embeds a script tag.
    ContentContainsScript,
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be just whitespace"),
            Self::TitleTooShort { min } => write!(f, "title must be at least {min} characters"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::ContentTooShort { min } => {
                write!(f, "content must be at least {min} characters")
            }
            Self::ContentTooLong { max } => write!(f, "content must be at most {max} characters"),
            Self::ContentContainsScript => write!(f, "content cannot contain script tags"),
        }
    }
}

impl std::error::Error for PostValidationError {}

impl ViolationCode for PostValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty",
            Self::TitleTooShort { .. } | Self::ContentTooShort { .. } => "too_short",
            Self::TitleTooLong { .. } | Self::ContentTooLong { .. } => "too_long",
            Self::ContentContainsScript => "forbidden_content",
        }
    }
}

/// Storage-assigned post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(i32);

impl PostId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Post headline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    /// Validate and construct a [`PostTitle`].
    pub fn new(title: impl Into<String>) -> Result<Self, PostValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        let length = title.chars().count();
        if length < TITLE_MIN {
            return Err(PostValidationError::TitleTooShort { min: TITLE_MIN });
        }
        if length > TITLE_MAX {
            return Err(PostValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for PostTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Post body text. Script tags are rejected in any letter case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// Validate and construct a [`PostContent`].
    pub fn new(content: impl Into<String>) -> Result<Self, PostValidationError> {
        let content = content.into();
        let length = content.chars().count();
        if length < CONTENT_MIN {
            return Err(PostValidationError::ContentTooShort { min: CONTENT_MIN });
        }
        if length > CONTENT_MAX {
            return Err(PostValidationError::ContentTooLong { max: CONTENT_MAX });
        }
        if content.to_lowercase().contains(FORBIDDEN_CONTENT) {
            return Err(PostValidationError::ContentContainsScript);
        }
        Ok(Self(content))
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated input for creating or fully replacing a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: PostTitle,
    content: PostContent,
}

impl PostDraft {
    /// Validate raw input, collecting a violation for every invalid field.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::PostDraft;
    ///
    /// let draft = PostDraft::try_from_parts("Hello world", "First post content.")
    ///     .expect("valid input");
    /// assert_eq!(draft.title().as_ref(), "Hello world");
    ///
    /// let errors = PostDraft::try_from_parts("Hi", "<SCRIPT>alert(1)</SCRIPT>")
    ///     .expect_err("invalid input");
    /// assert!(errors.has_field("content"));
    /// ```
    pub fn try_from_parts(title: &str, content: &str) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title = errors.check("title", PostTitle::new(title));
        let content = errors.check("content", PostContent::new(content));

        match (title, content) {
            (Some(title), Some(content)) => Ok(Self { title, content }),
            _ => Err(errors),
        }
    }

    /// Validated title.
    pub fn title(&self) -> &PostTitle {
        &self.title
    }

    /// Validated content.
    pub fn content(&self) -> &PostContent {
        &self.content
    }
}

/// Stored post record owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    title: PostTitle,
    content: PostContent,
    user_id: UserId,
    created_at: DateTime<Utc>,
}

impl Post {
    /// Build a [`Post`] from validated components.
    pub fn new(
        id: PostId,
        draft: PostDraft,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        let PostDraft { title, content } = draft;
        Self {
            id,
            title,
            content,
            user_id,
            created_at,
        }
    }

    /// Rebuild a [`Post`] from stored column values, re-checking invariants.
    pub fn try_from_stored(
        id: i32,
        title: String,
        content: String,
        user_id: i32,
        created_at: DateTime<Utc>,
    ) -> Result<Self, PostValidationError> {
        let draft = PostDraft {
            title: PostTitle::new(title)?,
            content: PostContent::new(content)?,
        };
        Ok(Self::new(
            PostId::new(id),
            draft,
            UserId::new(user_id),
            created_at,
        ))
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Headline.
    pub fn title(&self) -> &PostTitle {
        &self.title
    }

    /// Body text.
    pub fn content(&self) -> &PostContent {
        &self.content
    }

    /// Owning user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
