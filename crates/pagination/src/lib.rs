//! Offset windowing for paginated archive listings.
//!
//! A [`PageRequest`] is read from the query string and resolved into an offset
//! and a page size. Once the query layer knows how many rows match, the offset
//! is clamped into a [`PaginationDescriptor`] that carries everything needed to
//! render "Previous" / "Next" links and a "Page X of Y" indicator.
//!
//! Nothing in this crate fails: malformed or out-of-range input is normalized.

mod descriptor;
mod request;
mod uri;

pub use descriptor::PaginationDescriptor;
pub use request::{PageRequest, resolve_offset, resolve_page_size, resolve_page_size_within};
pub use uri::{encode_path, encode_segment};

/// Rows per page when the client does not ask for anything else.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 20;
