// Wed Aug 26 2026 - Alex

pub mod error;
pub mod lexer;
pub mod parser;
pub mod preprocessor;
pub mod types;

pub use error::ParseError;
pub use lexer::{Token, TokenKind};
pub use parser::Parser;
pub use preprocessor::Preprocessor;
pub use types::{ResolvedType, TypeTable, ENUM_SIZE, POINTER_SIZE};

use crate::tree::DeclNode;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// A parsed source file plus everything its (quoted) includes pulled in.
/// The root node and all children are immutable once returned; sharing a
/// unit across threads for concurrent lookups is fine.
#[derive(Debug)]
pub struct TranslationUnit {
    root: DeclNode,
    path: Option<PathBuf>,
}

impl TranslationUnit {
    pub fn root(&self) -> &DeclNode {
        &self.root
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Front-end entry point: holds the caller-supplied preprocessor
/// definitions (in the order given, -D style) and include directories,
/// and turns source text into a declaration tree in one blocking call.
#[derive(Debug, Clone, Default)]
pub struct ParseSession {
    definitions: IndexMap<String, Option<String>>,
    include_dirs: Vec<PathBuf>,
}

impl ParseSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definitions(mut self, definitions: IndexMap<String, Option<String>>) -> Self {
        self.definitions = definitions;
        self
    }

    pub fn with_include_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.include_dirs = dirs;
        self
    }

    /// Adds a -D style definition: `KEY` or `KEY=VALUE`.
    pub fn define(&mut self, spec: &str) {
        match spec.split_once('=') {
            Some((key, value)) => {
                self.definitions
                    .insert(key.to_string(), Some(value.to_string()));
            }
            None => {
                self.definitions.insert(spec.to_string(), None);
            }
        }
    }

    pub fn parse_file(&self, path: &Path) -> Result<TranslationUnit, ParseError> {
        let mut pp = self.build_preprocessor();
        let tokens = pp.preprocess_file(path)?;
        let root = Parser::new(tokens).parse()?;
        Ok(TranslationUnit {
            root,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn parse_source(&self, text: &str) -> Result<TranslationUnit, ParseError> {
        let mut pp = self.build_preprocessor();
        let tokens = pp.preprocess_text(text)?;
        let root = Parser::new(tokens).parse()?;
        Ok(TranslationUnit { root, path: None })
    }

    fn build_preprocessor(&self) -> Preprocessor {
        let mut pp = Preprocessor::new().with_include_dirs(self.include_dirs.clone());
        for (key, value) in &self.definitions {
            pp.define(key, value.as_deref());
        }
        pp
    }
}
