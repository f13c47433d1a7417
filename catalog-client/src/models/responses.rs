use crate::models::catalog::{null_as_default, CatalogItem, Suggestion};
use crate::session::cursor::page_count;
use serde::{Deserialize, Serialize};

/// One page of the catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BookPageRepr")]
pub struct BookPage {
    pub results: Vec<CatalogItem>,
    pub total_pages: Option<u64>,
    pub total_books: Option<u64>,
}

// Paginated serializer output (`results`/`count`) or the hand-built listing
// (`books`/`total_books`); some responses carry keys from both.
#[derive(Deserialize)]
struct BookPageRepr {
    #[serde(default)]
    results: Option<Vec<CatalogItem>>,
    #[serde(default)]
    books: Option<Vec<CatalogItem>>,
    #[serde(default)]
    total_pages: Option<u64>,
    #[serde(default)]
    total_books: Option<u64>,
    #[serde(default)]
    count: Option<u64>,
}

impl From<BookPageRepr> for BookPage {
    fn from(repr: BookPageRepr) -> Self {
        Self {
            results: repr.results.or(repr.books).unwrap_or_default(),
            total_pages: repr.total_pages,
            total_books: repr.total_books.or(repr.count),
        }
    }
}

impl BookPage {
    /// Last reachable page. An explicit page count wins over the item total.
    pub fn max_page(&self, page_size: u32) -> u32 {
        match (self.total_pages, self.total_books) {
            (Some(pages), _) if pages > 0 => u32::try_from(pages).unwrap_or(u32::MAX),
            (_, Some(total)) => page_count(total, page_size),
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub books: Vec<CatalogItem>,
    #[serde(default)]
    pub total_books: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_occurrences: u64,
}

impl SearchPage {
    pub fn total_books(&self) -> u64 {
        self.total_books.unwrap_or(self.books.len() as u64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct SuggestionsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct BooksResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub books: Vec<CatalogItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct LanguagesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
}

/// Combined outcome of a search and its suggestion lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub books: Vec<CatalogItem>,
    pub total_books: u64,
    pub total_occurrences: u64,
    pub suggestions: Vec<Suggestion>,
}

impl SearchResult {
    pub fn new(page: SearchPage, suggestions: Vec<Suggestion>) -> Self {
        Self {
            total_books: page.total_books(),
            total_occurrences: page.total_occurrences,
            books: page.books,
            suggestions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.total_books == 0
    }

    pub fn max_page(&self, page_size: u32) -> u32 {
        page_count(self.total_books, page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMatches {
    pub page_number: u32,
    pub occurrences: u64,
}

/// A page of a book's text, possibly carrying `<mark>` highlights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TextPageRepr")]
pub struct TextPage {
    pub text: String,
    pub total_pages: u64,
    pub total_occurrences: Option<u64>,
    pub matching_pages_stats: Vec<PageMatches>,
}

// The text endpoints report the page count as `total_books`.
#[derive(Deserialize)]
struct TextPageRepr {
    #[serde(default, deserialize_with = "null_as_default")]
    text: String,
    #[serde(default)]
    total_pages: Option<u64>,
    #[serde(default)]
    total_books: Option<u64>,
    #[serde(default)]
    total_occurrences: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    matching_pages_stats: Vec<PageMatches>,
}

impl From<TextPageRepr> for TextPage {
    fn from(repr: TextPageRepr) -> Self {
        Self {
            text: repr.text,
            total_pages: repr.total_pages.or(repr.total_books).unwrap_or_default(),
            total_occurrences: repr.total_occurrences,
            matching_pages_stats: repr.matching_pages_stats,
        }
    }
}

impl TextPage {
    pub fn max_page(&self) -> u32 {
        u32::try_from(self.total_pages).unwrap_or(u32::MAX).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn book_page_accepts_both_shapes() {
        let drf: BookPage = serde_json::from_value(json!({
            "count": 200,
            "next": "http://host/api/books/?page=3",
            "previous": null,
            "results": [{"id": 1, "title": "A"}]
        }))
        .unwrap();
        assert_eq!(drf.results.len(), 1);
        assert_eq!(drf.total_books, Some(200));
        assert_eq!(drf.max_page(5), 40);

        let legacy: BookPage = serde_json::from_value(json!({
            "books": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}],
            "total_pages": 12
        }))
        .unwrap();
        assert_eq!(legacy.results.len(), 2);
        assert_eq!(legacy.max_page(5), 12);
    }

    #[test]
    fn book_page_without_totals_has_one_page() {
        let page: BookPage = serde_json::from_value(json!({"results": []})).unwrap();
        assert_eq!(page.max_page(5), 1);
    }

    #[test]
    fn search_page_falls_back_to_listed_books() {
        let page: SearchPage = serde_json::from_value(json!({
            "word": "caesar",
            "books": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]
        }))
        .unwrap();
        assert_eq!(page.total_books(), 2);
        assert_eq!(page.total_occurrences, 0);
    }

    #[test]
    fn search_result_pages_by_total_books() {
        let page = SearchPage {
            books: Vec::new(),
            total_books: Some(200),
            total_occurrences: 1_250,
        };
        let result = SearchResult::new(page, Vec::new());
        assert_eq!(result.max_page(5), 40);
        assert!(!result.is_empty());
        assert!(SearchResult::default().is_empty());
    }

    #[test]
    fn text_page_reads_total_books_as_page_count() {
        let page: TextPage = serde_json::from_value(json!({
            "text": "--- PAGE 2 ---\nGallia est omnis divisa",
            "total_books": 9
        }))
        .unwrap();
        assert_eq!(page.total_pages, 9);
        assert_eq!(page.max_page(), 9);
        assert!(page.matching_pages_stats.is_empty());

        let empty: TextPage = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.max_page(), 1);
    }

    #[test]
    fn text_page_with_both_page_counts() {
        let page: TextPage = serde_json::from_value(json!({
            "text": "x",
            "total_books": 7,
            "total_pages": 7
        }))
        .unwrap();
        assert_eq!(page.max_page(), 7);

        let page: TextPage = serde_json::from_value(json!({
            "text": "x",
            "total_books": null,
            "total_pages": 4
        }))
        .unwrap();
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn book_page_with_keys_from_both_shapes() {
        let page: BookPage = serde_json::from_value(json!({
            "count": 200,
            "total_books": 200,
            "results": [{"id": 1, "title": "A"}],
            "books": [{"id": 1, "title": "A"}]
        }))
        .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.total_books, Some(200));
        assert_eq!(page.max_page(5), 40);

        let page: BookPage = serde_json::from_value(json!({
            "results": null,
            "books": [{"id": 2, "title": "B"}],
            "count": 6
        }))
        .unwrap();
        assert_eq!(page.results[0].id, 2);
        assert_eq!(page.max_page(5), 2);
    }
}
