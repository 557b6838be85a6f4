// Mon Aug 24 2026 - Alex

use crate::layout::error::LayoutError;
use crate::layout::normalize::normalize_field_name;
use crate::layout::record::{LayoutRecord, StructLayout};
use crate::tree::{find_struct, DeclNode};

pub const DEFAULT_CACHE_LINE_SIZE: u64 = 64;
pub const DEFAULT_SENTINEL: &str = "Cacheline1";
pub const DEFAULT_POINTER_LABEL: &str = "IntPtr";

/// Walks a struct declaration's direct fields in source order and
/// accumulates a running byte offset. The one piece of layout knowledge
/// baked in is the cache-line sentinel: when the sentinel field is seen,
/// everything after it is pushed to the cache-line boundary, and the
/// offset accumulated so far must still be short of that boundary or the
/// source structure no longer matches this model.
pub struct LayoutExtractor {
    cache_line_size: u64,
    sentinel: String,
    pointer_label: String,
}

impl LayoutExtractor {
    pub fn new() -> Self {
        Self {
            cache_line_size: DEFAULT_CACHE_LINE_SIZE,
            sentinel: DEFAULT_SENTINEL.to_string(),
            pointer_label: DEFAULT_POINTER_LABEL.to_string(),
        }
    }

    pub fn with_cache_line_size(mut self, size: u64) -> Self {
        self.cache_line_size = size;
        self
    }

    pub fn with_sentinel(mut self, sentinel: String) -> Self {
        self.sentinel = sentinel;
        self
    }

    pub fn with_pointer_label(mut self, label: String) -> Self {
        self.pointer_label = label;
        self
    }

    /// Locates `name` in the tree and extracts its layout. The locator's
    /// first-match policy applies: a forward declaration seen before the
    /// definition yields an empty record list.
    pub fn extract_by_name(
        &self,
        root: &DeclNode,
        name: &str,
    ) -> Result<StructLayout, LayoutError> {
        let node =
            find_struct(root, name).ok_or_else(|| LayoutError::StructNotFound(name.to_string()))?;
        let records = self.extract(node)?;
        Ok(StructLayout::new(
            name.to_string(),
            node.location().line,
            records,
        ))
    }

    pub fn extract(&self, struct_node: &DeclNode) -> Result<Vec<LayoutRecord>, LayoutError> {
        let mut offset = 0u64;
        let mut records = Vec::new();

        for child in struct_node.children() {
            if !child.is_field_decl() {
                // Nested types, prototypes, whatever else real headers
                // put inside a struct: diagnosed, never fatal.
                log::warn!(
                    "skipping {} '{}' at {} inside struct {}",
                    child.kind(),
                    child.spelling(),
                    child.location(),
                    struct_node.spelling()
                );
                continue;
            }

            let name = normalize_field_name(child.spelling());

            if name == self.sentinel {
                if offset >= self.cache_line_size {
                    return Err(LayoutError::LayoutInvariantViolation {
                        field: name,
                        offset,
                        boundary: self.cache_line_size,
                    });
                }
                offset = self.cache_line_size;
                continue;
            }

            let desc = match child.type_desc() {
                Some(desc) => desc,
                None => {
                    log::warn!(
                        "field '{}' at {} has no type descriptor, skipping",
                        child.spelling(),
                        child.location()
                    );
                    continue;
                }
            };

            // Bit-fields, incomplete types, zero-length markers: no
            // record, no offset advance.
            if desc.size() == 0 {
                continue;
            }

            let type_label = if desc.is_pointer() {
                self.pointer_label.clone()
            } else {
                desc.spelling().to_string()
            };

            records.push(LayoutRecord::new(offset, name, type_label, desc.size()));
            offset += desc.size();
        }

        Ok(records)
    }
}

impl Default for LayoutExtractor {
    fn default() -> Self {
        Self::new()
    }
}
