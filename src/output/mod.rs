// Wed Aug 26 2026 - Alex

pub mod json;
pub mod report;

pub use json::{JsonError, JsonSerializer};
pub use report::ReportFormatter;
