// Mon Aug 24 2026 - Alex

use crate::frontend::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Struct not found: {0}")]
    StructNotFound(String),
    #[error(
        "Layout invariant violated: sentinel '{field}' reached at offset {offset}, \
         which is already at or past the {boundary}-byte cache-line boundary"
    )]
    LayoutInvariantViolation {
        field: String,
        offset: u64,
        boundary: u64,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}
