// Mon Aug 24 2026 - Alex

use crate::layout::{DEFAULT_CACHE_LINE_SIZE, DEFAULT_POINTER_LABEL, DEFAULT_SENTINEL};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub source_file: Option<PathBuf>,
    pub target_struct: String,
    /// Preprocessor definitions in -D order; a None value means a bare
    /// flag (defined to 1).
    pub definitions: IndexMap<String, Option<String>>,
    pub include_dirs: Vec<PathBuf>,
    pub cache_line_size: u64,
    pub sentinel: String,
    pub pointer_label: String,
    pub json_output: Option<PathBuf>,
    pub enable_verbose_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        let mut definitions = IndexMap::new();
        definitions.insert("RTE_NEXT_ABI".to_string(), None);
        Self {
            source_file: None,
            target_struct: "rte_mbuf".to_string(),
            definitions,
            include_dirs: Vec::new(),
            cache_line_size: DEFAULT_CACHE_LINE_SIZE,
            sentinel: DEFAULT_SENTINEL.to_string(),
            pointer_label: DEFAULT_POINTER_LABEL.to_string(),
            json_output: None,
            enable_verbose_output: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_file(mut self, path: PathBuf) -> Self {
        self.source_file = Some(path);
        self
    }

    pub fn with_target_struct(mut self, name: String) -> Self {
        self.target_struct = name;
        self
    }

    pub fn with_definition(mut self, spec: &str) -> Self {
        match spec.split_once('=') {
            Some((key, value)) => {
                self.definitions
                    .insert(key.to_string(), Some(value.to_string()));
            }
            None => {
                self.definitions.insert(spec.to_string(), None);
            }
        }
        self
    }

    pub fn with_include_dir(mut self, dir: PathBuf) -> Self {
        self.include_dirs.push(dir);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.source_file.is_none() {
            return Err("source_file must be set".to_string());
        }
        if self.target_struct.is_empty() {
            return Err("target_struct must not be empty".to_string());
        }
        if self.sentinel.is_empty() {
            return Err("sentinel must not be empty".to_string());
        }
        if self.cache_line_size == 0 || !self.cache_line_size.is_power_of_two() {
            return Err("cache_line_size must be a nonzero power of two".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_mbuf_toolchain() {
        let config = Config::default();
        assert_eq!(config.target_struct, "rte_mbuf");
        assert_eq!(config.sentinel, "Cacheline1");
        assert_eq!(config.pointer_label, "IntPtr");
        assert_eq!(config.cache_line_size, 64);
        assert!(config.definitions.contains_key("RTE_NEXT_ABI"));
    }

    #[test]
    fn test_validate_requires_source() {
        let config = Config::default();
        assert!(config.validate().is_err());
        let config = config.with_source_file(PathBuf::from("rte_mbuf.h"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_definition_specs() {
        let config = Config::new()
            .with_definition("RTE_VER=2")
            .with_definition("BARE");
        assert_eq!(
            config.definitions.get("RTE_VER"),
            Some(&Some("2".to_string()))
        );
        assert_eq!(config.definitions.get("BARE"), Some(&None));
    }

    #[test]
    fn test_cache_line_must_be_power_of_two() {
        let mut config = Config::default().with_source_file(PathBuf::from("x.h"));
        config.cache_line_size = 48;
        assert!(config.validate().is_err());
    }
}
