use crate::error::CatalogResult;
use crate::models::catalog::{CatalogItem, Suggestion};
use crate::models::query::{SearchQuery, TextRequest};
use crate::models::responses::{BookPage, SearchPage, TextPage};
use crate::services::client::CatalogClient;
use crate::services::{books, search, text};
use crate::utils::progress::Progress;
use async_trait::async_trait;
use std::sync::Arc;

/// Every call the library screen makes against the catalog.
#[async_trait]
pub trait CatalogApi {
    async fn list_books(&self, page: u32, page_size: Option<u32>) -> CatalogResult<BookPage>;
    async fn get_book(&self, book_id: u32) -> CatalogResult<CatalogItem>;
    async fn books_by_language(&self, language: &str) -> CatalogResult<Vec<CatalogItem>>;
    async fn available_languages(&self) -> CatalogResult<Vec<String>>;
    async fn search(
        &self,
        query: &SearchQuery,
        progress: &mut Progress<'_>,
    ) -> CatalogResult<SearchPage>;
    async fn suggestions(
        &self,
        word: &str,
        progress: &mut Progress<'_>,
    ) -> CatalogResult<Vec<Suggestion>>;
    async fn book_text(&self, request: &TextRequest) -> CatalogResult<TextPage>;
    async fn ranked_search(&self, word: &str) -> CatalogResult<Vec<CatalogItem>>;
    async fn closeness_search(&self, word: &str) -> CatalogResult<Vec<CatalogItem>>;
    async fn advanced_search(&self, pattern: &str) -> CatalogResult<Vec<CatalogItem>>;
}

pub type Api = Arc<dyn CatalogApi + Send + Sync>;

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_books(&self, page: u32, page_size: Option<u32>) -> CatalogResult<BookPage> {
        books::list_books(self, page, page_size).await
    }

    async fn get_book(&self, book_id: u32) -> CatalogResult<CatalogItem> {
        books::get_book(self, book_id).await
    }

    async fn books_by_language(&self, language: &str) -> CatalogResult<Vec<CatalogItem>> {
        books::books_by_language(self, language).await
    }

    async fn available_languages(&self) -> CatalogResult<Vec<String>> {
        books::available_languages(self).await
    }

    async fn search(
        &self,
        query: &SearchQuery,
        progress: &mut Progress<'_>,
    ) -> CatalogResult<SearchPage> {
        search::search_page(self, query, progress).await
    }

    async fn suggestions(
        &self,
        word: &str,
        progress: &mut Progress<'_>,
    ) -> CatalogResult<Vec<Suggestion>> {
        search::suggestions(self, word, progress).await
    }

    async fn book_text(&self, request: &TextRequest) -> CatalogResult<TextPage> {
        text::book_text(self, request).await
    }

    async fn ranked_search(&self, word: &str) -> CatalogResult<Vec<CatalogItem>> {
        search::ranked_search(self, word).await
    }

    async fn closeness_search(&self, word: &str) -> CatalogResult<Vec<CatalogItem>> {
        search::closeness_search(self, word).await
    }

    async fn advanced_search(&self, pattern: &str) -> CatalogResult<Vec<CatalogItem>> {
        search::advanced_search(self, pattern).await
    }
}
