//! Client for the library book-catalog API.
//!
//! [`CatalogClient`] talks HTTP to the catalog; [`combined_search`] runs a
//! search plus its suggestion lookup as one step; the `session` types keep the
//! state of a browsing screen and a text reader on top of any [`CatalogApi`].

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

pub use config::ClientConfig;
pub use error::{CatalogError, CatalogResult};
pub use models::catalog::{Author, CatalogItem, Suggestion};
pub use models::query::{SearchField, SearchFilters, SearchQuery, TextRequest};
pub use models::responses::{BookPage, PageMatches, SearchPage, SearchResult, TextPage};
pub use services::api::{Api, CatalogApi};
pub use services::client::CatalogClient;
pub use services::combined::{combined_search, try_search};
pub use session::browse::{BrowseMode, BrowseSession};
pub use session::cursor::{page_count, PageCursor};
pub use session::reader::ReaderSession;
pub use session::sequence::{RequestSequence, Ticket};
pub use utils::progress::{Progress, ProgressSink};
