use crate::error::CatalogResult;
use crate::models::catalog::CatalogItem;
use crate::models::responses::{BookPage, LanguagesResponse};
use crate::services::client::CatalogClient;
use tracing::{error, info};

pub async fn list_books(
    client: &CatalogClient,
    page: u32,
    page_size: Option<u32>,
) -> CatalogResult<BookPage> {
    let page = page.max(1);
    let page_size = page_size.unwrap_or(client.config().page_size).max(1);
    let url = client.endpoint(
        &["books"],
        &[("page", page.to_string()), ("page_size", page_size.to_string())],
    )?;

    match client.get_json::<BookPage>(url, None).await {
        Ok(book_page) => {
            info!(
                "Fetched catalog page {} ({} books)",
                page,
                book_page.results.len()
            );
            Ok(book_page)
        }
        Err(e) => {
            error!("Failed to fetch catalog page {}: {}", page, e);
            Err(e)
        }
    }
}

pub async fn get_book(client: &CatalogClient, book_id: u32) -> CatalogResult<CatalogItem> {
    let id = book_id.to_string();
    let url = client.endpoint(&["book", &id], &[])?;

    client.get_json(url, None).await.map_err(|e| {
        error!("Failed to fetch book {}: {}", book_id, e);
        e
    })
}

pub async fn books_by_language(
    client: &CatalogClient,
    language: &str,
) -> CatalogResult<Vec<CatalogItem>> {
    let language = language.trim().to_lowercase();
    let url = client.endpoint(&["books", "by-language", &language], &[])?;

    let books: Vec<CatalogItem> = client.get_json(url, None).await.map_err(|e| {
        error!("Failed to fetch books in language '{}': {}", language, e);
        e
    })?;
    info!("Found {} books in language '{}'", books.len(), language);
    Ok(books)
}

pub async fn available_languages(client: &CatalogClient) -> CatalogResult<Vec<String>> {
    let url = client.endpoint(&["books", "available-languages"], &[])?;

    let response: LanguagesResponse = client.get_json(url, None).await.map_err(|e| {
        error!("Failed to fetch available languages: {}", e);
        e
    })?;

    let mut languages: Vec<String> = response
        .languages
        .into_iter()
        .map(|language| language.trim().to_lowercase())
        .filter(|language| !language.is_empty())
        .collect();
    languages.sort();
    languages.dedup();
    Ok(languages)
}
