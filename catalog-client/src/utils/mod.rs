pub mod highlight;
pub mod progress;
