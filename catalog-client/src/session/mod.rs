pub mod browse;
pub mod cursor;
pub mod reader;
pub mod sequence;
