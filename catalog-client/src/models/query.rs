use crate::config::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Author,
    Title,
    Text,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Author, SearchField::Title, SearchField::Text];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Author => "author",
            SearchField::Title => "title",
            SearchField::Text => "text",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The "search in" checkboxes. Nothing checked means every field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub author: bool,
    pub title: bool,
    pub text: bool,
}

impl SearchFilters {
    pub fn new(author: bool, title: bool, text: bool) -> Self {
        Self {
            author,
            title,
            text,
        }
    }

    pub fn is_enabled(&self, field: SearchField) -> bool {
        match field {
            SearchField::Author => self.author,
            SearchField::Title => self.title,
            SearchField::Text => self.text,
        }
    }

    pub fn toggle(&mut self, field: SearchField) {
        let flag = match field {
            SearchField::Author => &mut self.author,
            SearchField::Title => &mut self.title,
            SearchField::Text => &mut self.text,
        };
        *flag = !*flag;
    }

    /// Fields the search will match, in author/title/text order.
    pub fn fields(&self) -> Vec<SearchField> {
        let checked: Vec<SearchField> = SearchField::ALL
            .into_iter()
            .filter(|field| self.is_enabled(*field))
            .collect();
        if checked.is_empty() {
            SearchField::ALL.to_vec()
        } else {
            checked
        }
    }

    /// Path segment naming the fields, e.g. `title+text`.
    pub fn path_segment(&self) -> String {
        self.fields()
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join("+")
    }

    /// The selector as appended to the search word, e.g. `/title+text`.
    pub fn selector(&self) -> String {
        format!("/{}", self.path_segment())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub word: String,
    pub filters: SearchFilters,
    pub page: u32,
    pub page_size: u32,
}

impl SearchQuery {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            filters: SearchFilters::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn term(&self) -> &str {
        self.word.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.term().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRequest {
    pub book_id: u32,
    pub page: u32,
    pub highlight: Option<String>,
}

impl TextRequest {
    pub fn new(book_id: u32, page: u32) -> Self {
        Self {
            book_id,
            page: page.max(1),
            highlight: None,
        }
    }

    pub fn with_highlight(mut self, term: impl Into<String>) -> Self {
        self.highlight = Some(term.into());
        self
    }

    /// The highlight term with whitespace removed; `None` when nothing is left.
    pub fn highlight_term(&self) -> Option<String> {
        let term: String = self
            .highlight
            .as_deref()?
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        (!term.is_empty()).then_some(term)
    }
}
