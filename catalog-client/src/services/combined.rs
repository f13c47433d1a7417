use crate::error::CatalogResult;
use crate::models::query::SearchQuery;
use crate::models::responses::SearchResult;
use crate::services::api::CatalogApi;
use crate::utils::progress::{Progress, ProgressSink};
use tracing::{error, warn};

/// Share of the progress bar owned by the primary search; suggestions get the rest.
pub const PRIMARY_SHARE: u8 = 90;

/// Search followed by the suggestion lookup, as one result.
///
/// A failed suggestion lookup leaves the suggestions empty; a failed primary
/// search is returned. `progress` is finished at 100 either way.
pub async fn try_search(
    api: &(dyn CatalogApi + Send + Sync),
    query: &SearchQuery,
    progress: &mut Progress<'_>,
) -> CatalogResult<SearchResult> {
    let result = run(api, query, progress).await;
    progress.finish();
    result
}

async fn run(
    api: &(dyn CatalogApi + Send + Sync),
    query: &SearchQuery,
    progress: &mut Progress<'_>,
) -> CatalogResult<SearchResult> {
    if query.is_blank() {
        return Ok(SearchResult::default());
    }

    progress.stage(0, PRIMARY_SHARE);
    let page = api.search(query, progress).await?;

    progress.stage(PRIMARY_SHARE, 100 - PRIMARY_SHARE);
    let suggestions = match api.suggestions(query.term(), progress).await {
        Ok(suggestions) => suggestions,
        Err(e) => {
            warn!("No suggestions for '{}': {}", query.term(), e);
            Vec::new()
        }
    };

    Ok(SearchResult::new(page, suggestions))
}

/// Like [`try_search`], but a failed search yields an empty result.
pub async fn combined_search(
    api: &(dyn CatalogApi + Send + Sync),
    query: &SearchQuery,
    sink: Option<ProgressSink<'_>>,
) -> SearchResult {
    let mut progress = Progress::new(sink);
    match try_search(api, query, &mut progress).await {
        Ok(result) => result,
        Err(e) => {
            error!("Combined search for '{}' failed: {}", query.term(), e);
            SearchResult::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::query::SearchFilters;
    use crate::services::fake::FakeCatalog;

    fn is_non_decreasing(seen: &[u8]) -> bool {
        seen.windows(2).all(|w| w[0] <= w[1])
    }

    #[tokio::test]
    async fn merges_books_and_suggestions() {
        let catalog = FakeCatalog::with_books(12);
        let query = SearchQuery::new("caesar").with_page_size(5);

        let mut seen = Vec::new();
        let mut sink = |p: u8| seen.push(p);
        let result = combined_search(&catalog, &query, Some(&mut sink)).await;

        assert_eq!(result.books.len(), 5);
        assert_eq!(result.total_books, 12);
        assert_eq!(result.total_occurrences, 120);
        assert_eq!(result.suggestions.len(), 2);
        assert_eq!(seen, vec![90, 100]);
    }

    #[tokio::test]
    async fn primary_failure_yields_empty_result() {
        let catalog = FakeCatalog::with_books(12);
        catalog.fail_search(true);

        let mut seen = Vec::new();
        let mut sink = |p: u8| seen.push(p);
        let result =
            combined_search(&catalog, &SearchQuery::new("caesar"), Some(&mut sink)).await;

        assert_eq!(result, SearchResult::default());
        assert_eq!(result.total_books, 0);
        assert_eq!(result.total_occurrences, 0);
        assert_eq!(seen.last(), Some(&100));
        assert_eq!(catalog.suggestion_calls(), 0);
    }

    #[tokio::test]
    async fn suggestion_failure_keeps_books() {
        let catalog = FakeCatalog::with_books(3);
        catalog.fail_suggestions(true);

        let mut seen = Vec::new();
        let mut sink = |p: u8| seen.push(p);
        let result =
            combined_search(&catalog, &SearchQuery::new("caesar"), Some(&mut sink)).await;

        assert_eq!(result.books.len(), 3);
        assert!(result.suggestions.is_empty());
        assert!(is_non_decreasing(&seen));
        assert_eq!(seen.last(), Some(&100));
    }

    #[tokio::test]
    async fn blank_query_skips_the_network() {
        let catalog = FakeCatalog::with_books(3);

        let mut seen = Vec::new();
        let mut sink = |p: u8| seen.push(p);
        let result = combined_search(&catalog, &SearchQuery::new("   "), Some(&mut sink)).await;

        assert!(result.is_empty());
        assert_eq!(catalog.search_calls(), 0);
        assert_eq!(seen, vec![100]);
    }

    #[tokio::test]
    async fn try_search_propagates_primary_error() {
        let catalog = FakeCatalog::with_books(3);
        catalog.fail_search(true);

        let mut progress = Progress::silent();
        let result = try_search(&catalog, &SearchQuery::new("caesar"), &mut progress).await;

        assert!(result.is_err());
        assert_eq!(progress.last(), 100);
    }

    #[tokio::test]
    async fn forwards_selector_and_page() {
        let catalog = FakeCatalog::with_books(200);
        let query = SearchQuery::new("Caesar")
            .with_filters(SearchFilters::new(false, true, true))
            .with_page(2)
            .with_page_size(5);

        let result = combined_search(&catalog, &query, None).await;

        let last = catalog.last_search().unwrap();
        assert_eq!(last.filters.selector(), "/title+text");
        assert_eq!(last.page, 2);
        assert_eq!(result.max_page(5), 40);
        assert_eq!(result.books[0].id, 6);
    }
}
