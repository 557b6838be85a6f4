// Mon Aug 24 2026 - Alex

use serde::Serialize;
use std::fmt;

/// One retained field of the target struct: byte offset under the
/// running-offset model, normalized name, type label, and size. Records
/// are immutable once emitted and ordered by declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutRecord {
    offset: u64,
    name: String,
    type_label: String,
    size: u64,
}

impl LayoutRecord {
    pub fn new(offset: u64, name: String, type_label: String, size: u64) -> Self {
        Self {
            offset,
            name,
            type_label,
            size,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_label(&self) -> &str {
        &self.type_label
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn end(&self) -> u64 {
        self.offset + self.size
    }
}

impl fmt::Display for LayoutRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.offset, self.name, self.type_label, self.size
        )
    }
}

/// The full extraction result for one struct: its name, the source line
/// of the matched declaration (traceability for the binding author), and
/// the ordered records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructLayout {
    struct_name: String,
    declaration_line: u32,
    records: Vec<LayoutRecord>,
}

impl StructLayout {
    pub fn new(struct_name: String, declaration_line: u32, records: Vec<LayoutRecord>) -> Self {
        Self {
            struct_name,
            declaration_line,
            records,
        }
    }

    pub fn struct_name(&self) -> &str {
        &self.struct_name
    }

    pub fn declaration_line(&self) -> u32 {
        self.declaration_line
    }

    pub fn records(&self) -> &[LayoutRecord] {
        &self.records
    }

    pub fn total_span(&self) -> u64 {
        self.records.last().map(|r| r.end()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_end() {
        let record = LayoutRecord::new(64, "Next".to_string(), "IntPtr".to_string(), 8);
        assert_eq!(record.end(), 72);
        assert_eq!(record.to_string(), "64 Next IntPtr 8");
    }

    #[test]
    fn test_layout_span() {
        let layout = StructLayout::new(
            "rte_mbuf".to_string(),
            101,
            vec![
                LayoutRecord::new(0, "BufAddr".to_string(), "IntPtr".to_string(), 8),
                LayoutRecord::new(8, "BufPhysaddr".to_string(), "uint64_t".to_string(), 8),
            ],
        );
        assert_eq!(layout.total_span(), 16);
        assert_eq!(layout.declaration_line(), 101);
    }
}
