// Wed Aug 26 2026 - Alex

use crate::layout::StructLayout;
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON rendering of a layout report for downstream generators that
/// would rather not scrape the text rows.
pub struct JsonSerializer {
    pretty_print: bool,
    include_metadata: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self {
            pretty_print: true,
            include_metadata: true,
        }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    pub fn serialize(&self, layout: &StructLayout, source: Option<&Path>) -> Result<String, JsonError> {
        let value = self.build_json_value(layout, source)?;
        if self.pretty_print {
            Ok(serde_json::to_string_pretty(&value)?)
        } else {
            Ok(serde_json::to_string(&value)?)
        }
    }

    pub fn serialize_to_file<P: AsRef<Path>>(
        &self,
        layout: &StructLayout,
        source: Option<&Path>,
        path: P,
    ) -> Result<(), JsonError> {
        let json_str = self.serialize(layout, source)?;
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        writer.write_all(json_str.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn build_json_value(
        &self,
        layout: &StructLayout,
        source: Option<&Path>,
    ) -> Result<Value, JsonError> {
        let mut root = serde_json::Map::new();

        if self.include_metadata {
            root.insert("struct".to_string(), json!(layout.struct_name()));
            root.insert(
                "declaration_line".to_string(),
                json!(layout.declaration_line()),
            );
            if let Some(source) = source {
                root.insert("source".to_string(), json!(source.display().to_string()));
            }
            root.insert("span_bytes".to_string(), json!(layout.total_span()));
        }

        root.insert("fields".to_string(), serde_json::to_value(layout.records())?);
        Ok(Value::Object(root))
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn to_json_string(layout: &StructLayout) -> Result<String, JsonError> {
    JsonSerializer::new().serialize(layout, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRecord;

    #[test]
    fn test_serialized_fields_keep_order() {
        let layout = StructLayout::new(
            "rte_mbuf".to_string(),
            101,
            vec![
                LayoutRecord::new(0, "BufAddr".to_string(), "IntPtr".to_string(), 8),
                LayoutRecord::new(64, "RearmData".to_string(), "uint64_t".to_string(), 8),
            ],
        );
        let text = to_json_string(&layout).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["struct"], "rte_mbuf");
        assert_eq!(value["declaration_line"], 101);
        let fields = value["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["name"], "BufAddr");
        assert_eq!(fields[0]["offset"], 0);
        assert_eq!(fields[1]["offset"], 64);
        assert_eq!(fields[1]["type_label"], "uint64_t");
    }
}
