use crate::error::CatalogResult;
use crate::models::query::TextRequest;
use crate::models::responses::TextPage;
use crate::services::client::CatalogClient;
use tracing::{error, info};

/// Fetches one page of a book's text, highlighted when the request carries a term.
pub async fn book_text(client: &CatalogClient, request: &TextRequest) -> CatalogResult<TextPage> {
    let id = request.book_id.to_string();
    let page = request.page.max(1).to_string();
    let page_size = client.config().text_page_size.to_string();

    let url = match request.highlight_term() {
        Some(word) => client.endpoint(
            &["book", &id, "text", "highlight"],
            &[("word", word), ("page", page), ("page_size", page_size)],
        )?,
        None => client.endpoint(
            &["book", &id, "text"],
            &[("page", page), ("page_size", page_size)],
        )?,
    };

    match client.get_json::<TextPage>(url, None).await {
        Ok(text_page) => {
            info!(
                "Fetched page {}/{} of book {}",
                request.page, text_page.total_pages, request.book_id
            );
            Ok(text_page)
        }
        Err(e) => {
            error!(
                "Failed to fetch text of book {} (page {}): {}",
                request.book_id, request.page, e
            );
            Err(e)
        }
    }
}
