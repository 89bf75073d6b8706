use std::collections::BTreeMap;

use setlist_pagination::{PageRequest, PaginationDescriptor};

use crate::{config::PaginationConfig, database::models::Paged};

/// One page of rows together with the links around it.
pub struct Window<T> {
    pub rows: Vec<T>,
    pub total_count: i64,
    pub pagination: PaginationDescriptor,
}

/// Fetch the page described by `request`.
///
/// `fetch` is called with `(limit, offset)`. When the requested offset lies
/// past the last page it is called a second time with the clamped offset so
/// the rows always match the descriptor.
pub async fn fetch_window<T, F, Fut>(
    config: &PaginationConfig,
    request: &PageRequest,
    target_uri: String,
    mut extra_params: BTreeMap<String, String>,
    fetch: F,
) -> anyhow::Result<Window<T>>
where
    F: Fn(i64, i64) -> Fut,
    Fut: Future<Output = anyhow::Result<Paged<T>>>,
{
    let page_size = request.page_size(config.page_size, config.max_page_size).max(1);
    let offset = request.offset();

    let mut page = fetch(page_size, offset).await?;

    extra_params.extend(request.link_params(config.page_size, config.max_page_size));
    let pagination = PaginationDescriptor::compute(offset, page.total_count, page_size, target_uri, extra_params);

    if pagination.current_offset != offset && page.total_count > 0 {
        tracing::debug!(
            requested = offset,
            clamped = pagination.current_offset,
            "Offset past the last page, refetching"
        );
        page = fetch(page_size, pagination.current_offset).await?;
    }

    Ok(Window {
        rows: page.rows,
        total_count: page.total_count,
        pagination,
    })
}

/// Filter values echoed into every pagination link.
pub fn filters<const N: usize>(pairs: [(&str, &str); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
