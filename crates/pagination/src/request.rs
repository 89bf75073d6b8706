use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Raw pagination parameters as they arrive on the query string.
///
/// Both fields stay strings so that a malformed value never rejects the
/// request; they are normalized by [`PageRequest::offset`] and
/// [`PageRequest::page_size`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    offset: Option<String>,
    max: Option<String>,
}

impl PageRequest {
    pub fn new(offset: Option<&str>, max: Option<&str>) -> Self {
        Self {
            offset: offset.map(str::to_owned),
            max: max.map(str::to_owned),
        }
    }

    /// Pick `offset` and `max` out of a raw query string. The first occurrence
    /// of each wins and every other parameter is ignored.
    pub fn from_query_string(query: Option<&str>) -> Self {
        let mut request = Self::default();
        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "offset" if request.offset.is_none() => request.offset = Some(value.into_owned()),
                "max" if request.max.is_none() => request.max = Some(value.into_owned()),
                _ => {}
            }
        }
        request
    }

    pub fn offset(&self) -> i64 {
        resolve_offset(self.offset.as_deref())
    }

    pub fn page_size(&self, default: i64, max: i64) -> i64 {
        resolve_page_size_within(self.max.as_deref(), default, max)
    }

    /// Parameters that must survive into pagination links.
    ///
    /// Only an explicitly requested page size is carried; the offset is
    /// replaced by each link.
    pub fn link_params(&self, default: i64, max: i64) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if self.max.is_some() {
            let size = self.page_size(default, max);
            if size != default {
                params.insert("max".to_string(), size.to_string());
            }
        }
        params
    }
}

/// Resolve a raw offset. Unparsable or negative input yields 0.
///
/// No upper bound is applied here; the offset is clamped against the total
/// once it is known.
pub fn resolve_offset(raw: Option<&str>) -> i64 {
    match raw.map(|s| s.trim().parse::<i64>()) {
        Some(Ok(offset)) if offset >= 0 => offset,
        _ => 0,
    }
}

/// Resolve a raw page size against [`DEFAULT_PAGE_SIZE`] and [`MAX_PAGE_SIZE`].
pub fn resolve_page_size(raw: Option<&str>) -> i64 {
    resolve_page_size_within(raw, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
}

/// Resolve a raw page size. Anything unparsable, below 1, or above `max`
/// falls back to `default`.
pub fn resolve_page_size_within(raw: Option<&str>, default: i64, max: i64) -> i64 {
    match raw.map(|s| s.trim().parse::<i64>()) {
        Some(Ok(size)) if (1..=max).contains(&size) => size,
        _ => default,
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod request_tests;
