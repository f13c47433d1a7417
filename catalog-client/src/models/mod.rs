pub mod catalog;
pub mod responses;
pub mod query;
