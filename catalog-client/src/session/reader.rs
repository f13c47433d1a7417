use crate::error::CatalogResult;
use crate::models::query::TextRequest;
use crate::models::responses::TextPage;
use crate::services::api::Api;
use crate::session::cursor::PageCursor;

/// Book text reader: one book, one page at a time, optionally highlighting a term.
pub struct ReaderSession {
    api: Api,
    book_id: u32,
    highlight: Option<String>,
    cursor: PageCursor,
    page: Option<TextPage>,
}

impl ReaderSession {
    pub fn new(api: Api, book_id: u32) -> Self {
        Self {
            api,
            book_id,
            highlight: None,
            cursor: PageCursor::new(),
            page: None,
        }
    }

    pub fn with_highlight(mut self, term: impl Into<String>) -> Self {
        self.highlight = normalize(Some(term.into()));
        self
    }

    pub fn book_id(&self) -> u32 {
        self.book_id
    }

    pub fn highlight(&self) -> Option<&str> {
        self.highlight.as_deref()
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn page(&self) -> Option<&TextPage> {
        self.page.as_ref()
    }

    pub async fn open(&mut self) -> CatalogResult<&TextPage> {
        self.load(1).await
    }

    pub async fn load(&mut self, page: u32) -> CatalogResult<&TextPage> {
        let mut request = TextRequest::new(self.book_id, page);
        if let Some(term) = &self.highlight {
            request = request.with_highlight(term.clone());
        }

        let text_page = self.api.book_text(&request).await?;
        self.cursor.set_max(text_page.max_page());
        self.cursor.jump(request.page);
        Ok(&*self.page.insert(text_page))
    }

    /// Returns false without fetching when already on the last page.
    pub async fn next_page(&mut self) -> CatalogResult<bool> {
        if !self.cursor.has_next() {
            return Ok(false);
        }
        self.load(self.cursor.current() + 1).await?;
        Ok(true)
    }

    /// Returns false without fetching when already on the first page.
    pub async fn prev_page(&mut self) -> CatalogResult<bool> {
        if !self.cursor.has_prev() {
            return Ok(false);
        }
        self.load(self.cursor.current() - 1).await?;
        Ok(true)
    }

    /// Changes the highlighted term and reopens the book at its first page.
    pub async fn set_highlight(&mut self, term: Option<String>) -> CatalogResult<&TextPage> {
        self.highlight = normalize(term);
        self.load(1).await
    }
}

fn normalize(term: Option<String>) -> Option<String> {
    term.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
