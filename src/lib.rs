// Mon Aug 24 2026 - Alex

pub mod config;
pub mod frontend;
pub mod layout;
pub mod output;
pub mod tree;
pub mod utils;

pub use config::Config;
pub use frontend::{ParseSession, TranslationUnit};
pub use layout::{LayoutError, LayoutExtractor, LayoutRecord, StructLayout};
pub use output::{JsonSerializer, ReportFormatter};
pub use tree::{find_struct, DeclKind, DeclNode};
