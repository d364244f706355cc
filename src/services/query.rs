use crate::models::{PaginatedResponse, Resource, ResourceFilter, SortBy, ViewContext};

use super::recommendations::generate_recommendations;

/// Runs a catalog query: view selection, filtering, sorting, pagination
///
/// The stage order is fixed. View-context selection comes first because the
/// favorites and recommended views redefine the candidate universe; sorting
/// is skipped for recommendations, whose scorer output order is
/// authoritative; pagination comes last because it depends on the final
/// ordering and count.
///
/// Pure and stateless: same catalog and filter, same page (recommendation
/// cold start excepted, which is intentionally randomized).
pub fn execute_query(all_items: Vec<Resource>, filter: &ResourceFilter) -> PaginatedResponse {
    let favorite_ids = filter.favorite_ids.as_deref().unwrap_or_default();

    // 1. View-context selection
    let mut items = match filter.view {
        ViewContext::Recommended => generate_recommendations(all_items, favorite_ids),
        ViewContext::Favorites => {
            let mut items = all_items;
            items.retain(|r| favorite_ids.contains(&r.id));
            items
        }
        ViewContext::All => all_items,
    };

    // 2. Search over title or tags
    if let Some(term) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let term = term.to_lowercase();
        items.retain(|r| {
            r.title.to_lowercase().contains(&term)
                || r.tags.iter().any(|t| t.to_lowercase().contains(&term))
        });
    }

    // 3. Category filter (empty selection = no restriction)
    if !filter.categories.is_empty() {
        items.retain(|r| filter.categories.contains(&r.category));
    }

    // 4. Format filter
    if !filter.formats.is_empty() {
        items.retain(|r| filter.formats.contains(&r.format));
    }

    // 5. Sort, unless the scorer already ordered the list
    if filter.view != ViewContext::Recommended {
        match filter.sort {
            SortBy::Title => items.sort_by_cached_key(|r| r.title.to_lowercase()),
            SortBy::Newest => items.sort_by(|a, b| b.published.cmp(&a.published)),
        }
    }

    // 6. Pagination
    let total_items = items.len();
    let page = filter.page.max(1);
    let page_size = filter.page_size.max(1);
    let start = (page - 1).saturating_mul(page_size);
    let items: Vec<Resource> = items.into_iter().skip(start).take(page_size).collect();

    tracing::debug!(
        total_items,
        page,
        page_size,
        returned = items.len(),
        view = %filter.view,
        "Query executed"
    );

    PaginatedResponse { items, total_items }
}
