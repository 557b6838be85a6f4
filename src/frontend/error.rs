// Mon Aug 24 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unterminated block comment starting at line {line}")]
    UnterminatedComment { line: u32 },
    #[error("Unterminated {what} literal at line {line}")]
    UnterminatedLiteral { what: &'static str, line: u32 },
    #[error("Malformed preprocessor directive at line {line}: {message}")]
    MalformedDirective { line: u32, message: String },
    #[error("Unbalanced conditional directive at line {line}: {directive}")]
    UnbalancedConditional { line: u32, directive: String },
    #[error("Include cycle detected: {path}")]
    IncludeCycle { path: String },
    #[error("Unexpected token '{found}' at line {line} (expected {expected})")]
    UnexpectedToken {
        line: u32,
        found: String,
        expected: String,
    },
    #[error("Unexpected end of input (expected {expected})")]
    UnexpectedEof { expected: String },
}
