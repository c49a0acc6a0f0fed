//! Offset pagination primitives shared by list endpoints.
//!
//! A [`PageRequest`] is a validated `skip`/`limit` pair: `skip` is never
//! negative and `limit` is always positive. Adapters parse raw query values
//! through [`PageParams`] and answer with a [`Page`] envelope carrying the
//! total record count alongside the requested window.
//!
//! ```
//! use pagination::{Page, PageParams, PageRequest};
//!
//! let request = PageRequest::try_from(PageParams { skip: Some(2), limit: None })
//!     .expect("valid window");
//! assert_eq!(request.limit(), pagination::DEFAULT_LIMIT);
//!
//! let page = Page::new(request, 3, vec!["c"]);
//! assert_eq!(page.total(), 3);
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Number of records returned when the caller omits `limit`.
pub const DEFAULT_LIMIT: i64 = 10;

/// Reasons a pagination window is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// `skip` was below zero.
    #[error("skip must be greater than or equal to 0, got {skip}")]
    NegativeSkip {
        /// Rejected offset.
        skip: i64,
    },
    /// `limit` was zero or negative.
    #[error("limit must be greater than 0, got {limit}")]
    NonPositiveLimit {
        /// Rejected page size.
        limit: i64,
    },
}

impl PageRequestError {
    /// Name of the query parameter that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NegativeSkip { .. } => "skip",
            Self::NonPositiveLimit { .. } => "limit",
        }
    }
}

/// Raw pagination query parameters as received from a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Number of records to skip; defaults to zero.
    pub skip: Option<i64>,
    /// Maximum number of records to return; defaults to [`DEFAULT_LIMIT`].
    pub limit: Option<i64>,
}

/// Validated offset window over an ordered record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    skip: i64,
    limit: i64,
}

impl PageRequest {
    /// Validate and construct a window.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::NegativeSkip`] when `skip < 0` and
    /// [`PageRequestError::NonPositiveLimit`] when `limit <= 0`. The offset is
    /// checked first.
    pub const fn new(skip: i64, limit: i64) -> Result<Self, PageRequestError> {
        if skip < 0 {
            return Err(PageRequestError::NegativeSkip { skip });
        }
        if limit <= 0 {
            return Err(PageRequestError::NonPositiveLimit { limit });
        }
        Ok(Self { skip, limit })
    }

    /// Number of records skipped before the page starts.
    #[must_use]
    pub const fn skip(&self) -> i64 {
        self.skip
    }

    /// Maximum number of records in the page.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Index range selected by this window within a collection of `len`
    /// items. The range is clamped to the collection bounds.
    #[must_use]
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = usize::try_from(self.skip).unwrap_or(usize::MAX).min(len);
        let size = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let end = start.saturating_add(size).min(len);
        start..end
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: PageParams) -> Result<Self, Self::Error> {
        Self::new(value.skip.unwrap_or(0), value.limit.unwrap_or(DEFAULT_LIMIT))
    }
}

/// Page envelope returned by list endpoints.
///
/// Serialises as `{"total": .., "skip": .., "limit": .., "data": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    total: u64,
    skip: i64,
    limit: i64,
    data: Vec<T>,
}

impl<T> Page<T> {
    /// Wrap one window of records together with the total record count.
    #[must_use]
    pub const fn new(request: PageRequest, total: u64, data: Vec<T>) -> Self {
        Self {
            total,
            skip: request.skip,
            limit: request.limit,
            data,
        }
    }

    /// Total number of records across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Offset echoed from the request.
    #[must_use]
    pub const fn skip(&self) -> i64 {
        self.skip
    }

    /// Page size echoed from the request.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Records in this page.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consume the envelope and return its records.
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Convert every record while keeping the envelope metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            total: self.total,
            skip: self.skip,
            limit: self.limit,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
