//! Page-number pagination primitives for list endpoints.
//!
//! List endpoints accept loosely typed `page` and `limit` query values. This
//! crate turns them into a [`PageRequest`] whose values are always at least
//! one, and wraps a fetched slice together with the total row count in a
//! [`Paginated`] envelope.
//!
//! ```
//! use pagination::{PageRequest, Paginated};
//!
//! let request = PageRequest::from_query(Some("2"), Some("10"));
//! assert_eq!(request.offset(), 10);
//!
//! let page = Paginated::new(vec!["a", "b"], request, 12);
//! assert_eq!(page.page, 2);
//! assert_eq!(page.total, 12);
//! ```

use serde::{Deserialize, Serialize};

/// Page number used when the client does not supply one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the client does not supply one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Effective page number and page size for a list query.
///
/// Both values are at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

impl PageRequest {
    /// Build a request, raising zero values to one.
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self {
            page: floor_at_one(page),
            limit: floor_at_one(limit),
        }
    }

    /// Build a request from raw query-string values.
    ///
    /// Absent or non-numeric values fall back to [`DEFAULT_PAGE`] and
    /// [`DEFAULT_LIMIT`]; values below one are raised to one.
    #[must_use]
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            coerce_positive(page, DEFAULT_PAGE),
            coerce_positive(limit, DEFAULT_LIMIT),
        )
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip before the page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        let skipped_pages = self.page.saturating_sub(1) as u64;
        skipped_pages.saturating_mul(self.limit as u64)
    }
}

const fn floor_at_one(value: u32) -> u32 {
    if value == 0 { 1 } else { value }
}

/// Coerce a raw query value into a positive integer.
///
/// The value is read like a leading-integer parse: surrounding text after the
/// digits is ignored, so `"3abc"` and `"3.9"` both yield `3`. Missing or
/// non-numeric input yields `default`; zero and negative numbers yield `1`;
/// values beyond `u32::MAX` saturate.
#[must_use]
pub fn coerce_positive(raw: Option<&str>, default: u32) -> u32 {
    match raw.and_then(parse_leading_integer) {
        None => default,
        Some(value) if value < 1 => 1,
        Some(value) => u32::try_from(value).unwrap_or(u32::MAX),
    }
}

fn parse_leading_integer(raw: &str) -> Option<i64> {
    let mut chars = raw.trim_start().chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut magnitude: i64 = 0;
    let mut seen_digit = false;
    for ch in chars {
        let Some(digit) = ch.to_digit(10) else {
            break;
        };
        seen_digit = true;
        magnitude = magnitude
            .saturating_mul(10)
            .saturating_add(i64::from(digit));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -magnitude } else { magnitude })
}

/// A page of items plus the figures a client needs to navigate.
///
/// `total` is counted separately from the page slice, so it may drift from
/// the data under concurrent writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Items on this page, in storage order.
    pub data: Vec<T>,
    /// Effective one-based page number.
    pub page: u32,
    /// Effective page size.
    pub limit: u32,
    /// Total number of items across all pages.
    pub total: u64,
}

impl<T> Paginated<T> {
    /// Wrap a fetched page.
    #[must_use]
    pub const fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            page: request.page,
            limit: request.limit,
            total,
        }
    }

    /// Convert every item while keeping the page figures.
    #[must_use]
    pub fn map<U, F>(self, convert: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            data: self.data.into_iter().map(convert).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }
}
