use crate::error::{CatalogError, CatalogResult};
use crate::models::catalog::{CatalogItem, Suggestion};
use crate::models::query::SearchQuery;
use crate::models::responses::{BooksResponse, SearchPage, SuggestionsResponse};
use crate::services::client::CatalogClient;
use crate::utils::progress::Progress;
use fancy_regex::Regex;
use tracing::{error, info};

fn required<'a>(word: &'a str, what: &'static str) -> CatalogResult<&'a str> {
    let word = word.trim();
    if word.is_empty() {
        return Err(CatalogError::EmptyQuery(what));
    }
    Ok(word)
}

pub async fn search_page(
    client: &CatalogClient,
    query: &SearchQuery,
    progress: &mut Progress<'_>,
) -> CatalogResult<SearchPage> {
    let word = required(&query.word, "search word")?;
    let fields = query.filters.path_segment();
    let url = client.endpoint(
        &["search", word, &fields],
        &[
            ("page", query.page.max(1).to_string()),
            ("page_size", query.page_size.max(1).to_string()),
        ],
    )?;

    info!("Searching '{}' in {} (page {})", word, fields, query.page);
    match client.get_json::<SearchPage>(url, Some(progress)).await {
        Ok(page) => {
            info!(
                "Search '{}' matched {} books, {} occurrences",
                word,
                page.total_books(),
                page.total_occurrences
            );
            Ok(page)
        }
        Err(e) => {
            error!("Search for '{}' failed: {}", word, e);
            Err(e)
        }
    }
}

pub async fn suggestions(
    client: &CatalogClient,
    word: &str,
    progress: &mut Progress<'_>,
) -> CatalogResult<Vec<Suggestion>> {
    let word = required(word, "suggestion word")?;
    let url = client.endpoint(&["search", "suggestions", word], &[])?;

    let response: SuggestionsResponse = client.get_json(url, Some(progress)).await?;
    Ok(response.suggestions)
}

pub async fn ranked_search(client: &CatalogClient, word: &str) -> CatalogResult<Vec<CatalogItem>> {
    let word = required(word, "search word")?;
    let url = client.endpoint(&["ranked_book_search"], &[("word", word.to_string())])?;
    fetch_books(client, url, "ranked search", word).await
}

pub async fn closeness_search(
    client: &CatalogClient,
    word: &str,
) -> CatalogResult<Vec<CatalogItem>> {
    let word = required(word, "search word")?;
    let url = client.endpoint(&["search", "closeness"], &[("word", word.to_string())])?;
    fetch_books(client, url, "closeness search", word).await
}

/// Regex search. The pattern is compiled locally first so a malformed
/// pattern never reaches the server. Lookaround and backreferences are
/// accepted, as the server's regex engine supports them.
pub async fn advanced_search(
    client: &CatalogClient,
    pattern: &str,
) -> CatalogResult<Vec<CatalogItem>> {
    let pattern = required(pattern, "search pattern")?;
    Regex::new(pattern)?;
    let url = client.endpoint(&["search", "advanced"], &[("pattern", pattern.to_string())])?;
    fetch_books(client, url, "advanced search", pattern).await
}

async fn fetch_books(
    client: &CatalogClient,
    url: reqwest::Url,
    kind: &str,
    term: &str,
) -> CatalogResult<Vec<CatalogItem>> {
    match client.get_json::<BooksResponse>(url, None).await {
        Ok(response) => {
            info!("{} for '{}' returned {} books", kind, term, response.books.len());
            Ok(response.books)
        }
        Err(e) => {
            error!("{} for '{}' failed: {}", kind, term, e);
            Err(e)
        }
    }
}
