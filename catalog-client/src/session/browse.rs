use crate::error::CatalogResult;
use crate::models::catalog::{CatalogItem, Suggestion};
use crate::models::query::{SearchField, SearchFilters, SearchQuery};
use crate::models::responses::{BookPage, SearchResult};
use crate::services::api::Api;
use crate::services::combined::combined_search;
use crate::session::cursor::PageCursor;
use crate::session::sequence::{RequestSequence, Ticket};
use crate::utils::progress::ProgressSink;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    Catalog,
    Search,
}

/// State behind the library screen: what is listed, which page, which filters.
pub struct BrowseSession {
    api: Api,
    page_size: u32,
    mode: BrowseMode,
    query: String,
    filters: SearchFilters,
    cursor: PageCursor,
    books: Vec<CatalogItem>,
    suggestions: Vec<Suggestion>,
    total_books: u64,
    total_occurrences: u64,
    loading: bool,
    sequence: RequestSequence,
}

impl BrowseSession {
    pub fn new(api: Api, page_size: u32) -> Self {
        Self {
            api,
            page_size: page_size.max(1),
            mode: BrowseMode::Catalog,
            query: String::new(),
            filters: SearchFilters::default(),
            cursor: PageCursor::new(),
            books: Vec::new(),
            suggestions: Vec::new(),
            total_books: 0,
            total_occurrences: 0,
            loading: false,
            sequence: RequestSequence::new(),
        }
    }

    pub fn mode(&self) -> BrowseMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> SearchFilters {
        self.filters
    }

    pub fn set_filters(&mut self, filters: SearchFilters) {
        self.filters = filters;
    }

    /// Flips one "search in" box. Takes effect on the next search.
    pub fn toggle_filter(&mut self, field: SearchField) {
        self.filters.toggle(field);
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn books(&self) -> &[CatalogItem] {
        &self.books
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn total_books(&self) -> u64 {
        self.total_books
    }

    pub fn total_occurrences(&self) -> u64 {
        self.total_occurrences
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Starts a request. Responses for older tickets are ignored from now on.
    pub fn begin(&mut self) -> Ticket {
        self.loading = true;
        self.sequence.begin()
    }

    /// Applies a catalog page fetched for `ticket`. Returns false if stale.
    pub fn apply_page(&mut self, ticket: Ticket, page: u32, book_page: BookPage) -> bool {
        if !self.sequence.is_current(ticket) {
            debug!("Dropping stale catalog page {} (ticket {})", page, ticket.id());
            return false;
        }
        self.loading = false;
        self.mode = BrowseMode::Catalog;
        self.cursor.set_max(book_page.max_page(self.page_size));
        self.land_on(page);
        self.total_books = book_page
            .total_books
            .unwrap_or(book_page.results.len() as u64);
        self.total_occurrences = 0;
        self.suggestions.clear();
        self.books = book_page.results;
        true
    }

    /// Applies a search result fetched for `ticket`. Returns false if stale.
    pub fn apply_search(&mut self, ticket: Ticket, page: u32, result: SearchResult) -> bool {
        if !self.sequence.is_current(ticket) {
            debug!("Dropping stale search page {} (ticket {})", page, ticket.id());
            return false;
        }
        self.loading = false;
        self.mode = BrowseMode::Search;
        self.cursor.set_total_items(result.total_books, self.page_size);
        self.land_on(page);
        self.total_books = result.total_books;
        self.total_occurrences = result.total_occurrences;
        self.suggestions = result.suggestions;
        self.books = result.books;
        true
    }

    // The server may report fewer pages than the one just fetched.
    fn land_on(&mut self, page: u32) {
        self.cursor.jump(page);
        if self.cursor.current() != page {
            debug!(
                "Page {} is past the last page {}, showing it as page {}",
                page,
                self.cursor.max(),
                self.cursor.current()
            );
        }
    }

    fn abandon(&mut self, ticket: Ticket) {
        if self.sequence.is_current(ticket) {
            self.loading = false;
        }
    }

    pub async fn load_page(&mut self, page: u32) -> CatalogResult<()> {
        let page = page.max(1);
        let ticket = self.begin();
        match self.api.list_books(page, Some(self.page_size)).await {
            Ok(book_page) => {
                self.apply_page(ticket, page, book_page);
                Ok(())
            }
            Err(e) => {
                self.abandon(ticket);
                Err(e)
            }
        }
    }

    /// Searches from the first page. A blank query goes back to the catalog.
    pub async fn search(&mut self, query: &str, sink: Option<ProgressSink<'_>>) -> CatalogResult<()> {
        self.query = query.trim().to_string();
        if self.query.is_empty() {
            return self.load_page(1).await;
        }
        self.search_page(1, sink).await;
        Ok(())
    }

    async fn search_page(&mut self, page: u32, sink: Option<ProgressSink<'_>>) {
        let ticket = self.begin();
        let query = SearchQuery::new(self.query.clone())
            .with_filters(self.filters)
            .with_page(page)
            .with_page_size(self.page_size);
        let result = combined_search(&*self.api, &query, sink).await;
        self.apply_search(ticket, page, result);
    }

    pub async fn clear_search(&mut self) -> CatalogResult<()> {
        self.query.clear();
        self.load_page(1).await
    }

    pub async fn goto(&mut self, page: u32, sink: Option<ProgressSink<'_>>) -> CatalogResult<()> {
        match self.mode {
            BrowseMode::Catalog => self.load_page(page).await,
            BrowseMode::Search => {
                self.search_page(page, sink).await;
                Ok(())
            }
        }
    }

    pub async fn refresh(&mut self, sink: Option<ProgressSink<'_>>) -> CatalogResult<()> {
        self.goto(self.cursor.current(), sink).await
    }

    /// Returns false without fetching when already on the last page.
    pub async fn next_page(&mut self, sink: Option<ProgressSink<'_>>) -> CatalogResult<bool> {
        if !self.cursor.has_next() {
            return Ok(false);
        }
        self.goto(self.cursor.current() + 1, sink).await?;
        Ok(true)
    }

    /// Returns false without fetching when already on the first page.
    pub async fn prev_page(&mut self, sink: Option<ProgressSink<'_>>) -> CatalogResult<bool> {
        if !self.cursor.has_prev() {
            return Ok(false);
        }
        self.goto(self.cursor.current() - 1, sink).await?;
        Ok(true)
    }
}
