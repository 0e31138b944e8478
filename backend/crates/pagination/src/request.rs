//! Page number and size parsing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size applied when the caller omits `size` or passes zero.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size served; larger requests are clamped.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Errors raised while parsing paging parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The `page` parameter was not a non-negative integer.
    #[error("page must be a non-negative integer, got `{value}`")]
    InvalidPageNumber {
        /// Raw parameter value.
        value: String,
    },
    /// The `size` parameter was not a non-negative integer.
    #[error("size must be a non-negative integer, got `{value}`")]
    InvalidPageSize {
        /// Raw parameter value.
        value: String,
    },
}

/// Zero-based page index plus page size.
///
/// # Examples
///
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(2, 10);
/// assert_eq!(request.offset(), 20);
/// assert_eq!(PageRequest::new(0, 0).size(), pagination::DEFAULT_PAGE_SIZE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Build a request, substituting the default for a zero size and
    /// clamping oversized pages to [`MAX_PAGE_SIZE`].
    #[must_use]
    pub const fn new(number: u32, size: u32) -> Self {
        let normalised = if size == 0 {
            DEFAULT_PAGE_SIZE
        } else if size > MAX_PAGE_SIZE {
            MAX_PAGE_SIZE
        } else {
            size
        };
        Self {
            number,
            size: normalised,
        }
    }

    /// Parse optional raw `page` and `size` query values.
    ///
    /// Blank values behave as if absent.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] when either value is present but not a
    /// non-negative integer.
    pub fn from_params(page: Option<&str>, size: Option<&str>) -> Result<Self, PaginationError> {
        let number = match non_blank(page) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| PaginationError::InvalidPageNumber {
                    value: raw.to_owned(),
                })?,
            None => 0,
        };
        let requested_size = match non_blank(size) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| PaginationError::InvalidPageSize {
                    value: raw.to_owned(),
                })?,
            None => DEFAULT_PAGE_SIZE,
        };
        Ok(Self::new(number, requested_size))
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of matching items preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.number) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|raw| !raw.is_empty())
}
