pub mod api;
pub mod books;
pub mod client;
pub mod combined;
pub mod search;
pub mod text;

#[cfg(test)]
pub(crate) mod fake;
