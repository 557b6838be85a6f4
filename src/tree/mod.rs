// Mon Aug 24 2026 - Alex

pub mod locator;
pub mod node;

pub use locator::find_struct;
pub use node::{DeclKind, DeclNode, SourceLocation, TypeDesc, TypeKind};
