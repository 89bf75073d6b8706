use std::collections::BTreeMap;

use url::form_urlencoded;

/// Navigation window for one paginated response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationDescriptor {
    /// Offset actually used for the query, clamped into `[0, last_offset]`.
    pub current_offset: i64,
    pub next_offset: i64,
    pub previous_offset: i64,
    /// Offset of the first row of the final page, never negative.
    pub last_offset: i64,
    pub page_size: i64,
    pub total_count: i64,
    /// 1-indexed page number.
    pub current_page: i64,
    pub total_pages: i64,
    /// Base path the pagination links point at, already percent-encoded.
    pub target_uri: String,
    /// Active filters echoed into every link.
    pub extra_params: BTreeMap<String, String>,
}

impl PaginationDescriptor {
    /// Clamp `offset` against `total_count` and derive the navigation window.
    ///
    /// A request past the end resolves to the start of the final page. An
    /// empty result set produces a window with zero pages. A page size below
    /// one is treated as one.
    pub fn compute(
        offset: i64,
        total_count: i64,
        page_size: i64,
        target_uri: impl Into<String>,
        extra_params: BTreeMap<String, String>,
    ) -> Self {
        let page_size = page_size.max(1);
        let total_count = total_count.max(0);

        let last_offset = (total_count - page_size).max(0);
        let offset = offset.clamp(0, last_offset);

        let next_offset = offset.saturating_add(page_size).min(last_offset);
        let previous_offset = (offset - page_size).max(0);

        let total_pages = total_count / page_size + i64::from(total_count % page_size != 0);

        // An offset between page boundaries counts as the page after the one
        // it falls in.
        let mut current_page = offset / page_size + 1;
        if offset % page_size != 0 {
            current_page += 1;
        }
        if total_pages > 0 {
            current_page = current_page.clamp(1, total_pages);
        }

        Self {
            current_offset: offset,
            next_offset,
            previous_offset,
            last_offset,
            page_size,
            total_count,
            current_page,
            total_pages,
            target_uri: target_uri.into(),
            extra_params,
        }
    }

    /// "Page X of Y".
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        self.current_offset > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_offset < self.last_offset
    }

    pub fn previous_href(&self) -> String {
        self.href(self.previous_offset)
    }

    pub fn next_href(&self) -> String {
        self.href(self.next_offset)
    }

    pub fn first_href(&self) -> String {
        self.href(0)
    }

    pub fn last_href(&self) -> String {
        self.href(self.last_offset)
    }

    /// Link to `target_uri` at `offset`, preserving the active filters.
    pub fn href(&self, offset: i64) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("offset", &offset.to_string());
        for (key, value) in &self.extra_params {
            if key != "offset" {
                query.append_pair(key, value);
            }
        }
        format!("{}?{}", self.target_uri, query.finish())
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod descriptor_tests;
