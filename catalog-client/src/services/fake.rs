//! In-memory catalog for unit tests.

use crate::error::{CatalogError, CatalogResult};
use crate::models::catalog::{Author, CatalogItem, Suggestion};
use crate::models::query::{SearchQuery, TextRequest};
use crate::models::responses::{BookPage, SearchPage, TextPage};
use crate::services::api::CatalogApi;
use crate::utils::progress::Progress;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct FakeState {
    fail_list: bool,
    fail_search: bool,
    fail_suggestions: bool,
    list_calls: usize,
    search_calls: usize,
    suggestion_calls: usize,
    last_search: Option<SearchQuery>,
    last_text: Option<TextRequest>,
}

pub struct FakeCatalog {
    books: Vec<CatalogItem>,
    text_pages: u64,
    state: Mutex<FakeState>,
}

pub fn book(id: u32) -> CatalogItem {
    CatalogItem {
        id,
        title: format!("Book {}", id),
        author: Some(Author {
            id: Some(id % 7),
            name: format!("Author {}", id % 7),
            birth_year: Some(1800),
            death_year: Some(1870),
        }),
        summary: Some(format!("Summary of book {}", id)),
        languages: Some("en".to_string()),
        formats: BTreeMap::new(),
        occurrences: None,
        closeness_score: None,
        word_found_in_text: None,
    }
}

fn failure(endpoint: &str) -> CatalogError {
    CatalogError::Status {
        endpoint: endpoint.to_string(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn slice(books: &[CatalogItem], page: u32, page_size: u32) -> Vec<CatalogItem> {
    let page_size = page_size.max(1) as usize;
    let start = (page.max(1) as usize - 1) * page_size;
    books.iter().skip(start).take(page_size).cloned().collect()
}

impl FakeCatalog {
    pub fn with_books(count: u32) -> Self {
        Self {
            books: (1..=count).map(book).collect(),
            text_pages: 4,
            state: Mutex::new(FakeState::default()),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn fail_list(&self, fail: bool) {
        self.state().fail_list = fail;
    }

    pub fn fail_search(&self, fail: bool) {
        self.state().fail_search = fail;
    }

    pub fn fail_suggestions(&self, fail: bool) {
        self.state().fail_suggestions = fail;
    }

    pub fn list_calls(&self) -> usize {
        self.state().list_calls
    }

    pub fn search_calls(&self) -> usize {
        self.state().search_calls
    }

    pub fn suggestion_calls(&self) -> usize {
        self.state().suggestion_calls
    }

    pub fn last_search(&self) -> Option<SearchQuery> {
        self.state().last_search.clone()
    }

    pub fn last_text(&self) -> Option<TextRequest> {
        self.state().last_text.clone()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_books(&self, page: u32, page_size: Option<u32>) -> CatalogResult<BookPage> {
        let mut state = self.state();
        state.list_calls += 1;
        if state.fail_list {
            return Err(failure("/books/"));
        }
        Ok(BookPage {
            results: slice(&self.books, page, page_size.unwrap_or(5)),
            total_pages: None,
            total_books: Some(self.books.len() as u64),
        })
    }

    async fn get_book(&self, book_id: u32) -> CatalogResult<CatalogItem> {
        self.books
            .iter()
            .find(|book| book.id == book_id)
            .cloned()
            .ok_or_else(|| CatalogError::Status {
                endpoint: format!("/book/{}/", book_id),
                status: StatusCode::NOT_FOUND,
            })
    }

    async fn books_by_language(&self, _language: &str) -> CatalogResult<Vec<CatalogItem>> {
        Ok(self.books.clone())
    }

    async fn available_languages(&self) -> CatalogResult<Vec<String>> {
        Ok(vec!["en".to_string(), "fr".to_string()])
    }

    async fn search(
        &self,
        query: &SearchQuery,
        progress: &mut Progress<'_>,
    ) -> CatalogResult<SearchPage> {
        let fail = {
            let mut state = self.state();
            state.search_calls += 1;
            state.last_search = Some(query.clone());
            state.fail_search
        };
        if fail {
            return Err(failure("/search/"));
        }
        progress.transferred(1, 1);
        Ok(SearchPage {
            books: slice(&self.books, query.page, query.page_size),
            total_books: Some(self.books.len() as u64),
            total_occurrences: self.books.len() as u64 * 10,
        })
    }

    async fn suggestions(
        &self,
        word: &str,
        progress: &mut Progress<'_>,
    ) -> CatalogResult<Vec<Suggestion>> {
        let fail = {
            let mut state = self.state();
            state.suggestion_calls += 1;
            state.fail_suggestions
        };
        if fail {
            return Err(failure("/search/suggestions/"));
        }
        progress.transferred(1, 1);
        Ok(vec![
            Suggestion {
                word: format!("{}s", word),
                occurrences: 4,
            },
            Suggestion {
                word: format!("{}e", word),
                occurrences: 1,
            },
        ])
    }

    async fn book_text(&self, request: &TextRequest) -> CatalogResult<TextPage> {
        self.state().last_text = Some(request.clone());
        let body = match request.highlight_term() {
            Some(term) => format!("before <mark>{}</mark> after", term),
            None => format!("text of book {}", request.book_id),
        };
        Ok(TextPage {
            text: format!("--- PAGE {} ---\n{}", request.page, body),
            total_pages: self.text_pages,
            total_occurrences: None,
            matching_pages_stats: Vec::new(),
        })
    }

    async fn ranked_search(&self, _word: &str) -> CatalogResult<Vec<CatalogItem>> {
        Ok(self.books.clone())
    }

    async fn closeness_search(&self, _word: &str) -> CatalogResult<Vec<CatalogItem>> {
        Ok(self.books.clone())
    }

    async fn advanced_search(&self, _pattern: &str) -> CatalogResult<Vec<CatalogItem>> {
        Ok(self.books.clone())
    }
}
