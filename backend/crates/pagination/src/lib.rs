//! Offset pagination primitives shared by roster backend list endpoints.
//!
//! The crate covers the transport-neutral half of paging:
//!
//! - [`PageRequest`] parses and normalises `page`/`size` parameters.
//! - [`Sort`] parses repeatable `sort=prop[,prop...][,asc|desc]` values.
//! - [`Page`] carries one slice of results with the total match count and
//!   exposes [`PageMetadata`] for response envelopes.
//! - [`PageLinks`] derives first/prev/self/next/last navigation links from
//!   the request URL, preserving every other query parameter.

mod links;
mod page;
mod request;
mod sort;

pub use links::{Link, PageLinks};
pub use page::{Page, PageMetadata};
pub use request::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PaginationError};
pub use sort::{Direction, Sort, SortOrder};
