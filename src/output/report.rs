// Wed Aug 26 2026 - Alex

use crate::layout::StructLayout;
use colored::Colorize;
use itertools::Itertools;
use std::fmt::Write;

/// Renders the layout report printed to stdout: a traceability header
/// (struct name and declaration line), then one aligned row per record
/// in the `offset name type size` shape the downstream generators read.
pub struct ReportFormatter {
    use_color: bool,
    show_header: bool,
    min_name_width: usize,
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self {
            use_color: true,
            show_header: true,
            min_name_width: 12,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_header(mut self, show_header: bool) -> Self {
        self.show_header = show_header;
        self
    }

    pub fn format(&self, layout: &StructLayout) -> String {
        let mut out = String::new();

        if self.show_header {
            let title = format!(
                "struct {} (declared at line {})",
                layout.struct_name(),
                layout.declaration_line()
            );
            if self.use_color {
                let _ = writeln!(out, "{}", title.cyan().bold());
                let _ = writeln!(out, "{}", "-".repeat(title.len()).cyan());
            } else {
                let _ = writeln!(out, "{}", title);
                let _ = writeln!(out, "{}", "-".repeat(title.len()));
            }
        }

        let name_width = layout
            .records()
            .iter()
            .map(|r| r.name().len())
            .max()
            .unwrap_or(0)
            .max(self.min_name_width);
        let type_width = layout
            .records()
            .iter()
            .map(|r| r.type_label().len())
            .max()
            .unwrap_or(0);
        let offset_width = layout
            .records()
            .iter()
            .map(|r| r.offset().to_string().len())
            .max()
            .unwrap_or(1);

        for record in layout.records() {
            let offset = format!("{:>width$}", record.offset(), width = offset_width);
            let name = format!("{:<width$}", record.name(), width = name_width);
            let label = format!("{:<width$}", record.type_label(), width = type_width);
            if self.use_color {
                let _ = writeln!(
                    out,
                    "{} {} {} {}",
                    offset.yellow(),
                    name.green(),
                    label,
                    record.size()
                );
            } else {
                let _ = writeln!(out, "{} {} {} {}", offset, name, label, record.size());
            }
        }

        if self.show_header {
            let fields = layout.records().len();
            let _ = writeln!(
                out,
                "{} field{}, {} bytes spanned",
                fields,
                if fields == 1 { "" } else { "s" },
                layout.total_span()
            );
        }
        out
    }

    /// Bare rows only, exactly one record per line. This is the format
    /// the mirror-type generators consume.
    pub fn format_plain(&self, layout: &StructLayout) -> String {
        layout
            .records()
            .iter()
            .map(|r| r.to_string())
            .join("\n")
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRecord;

    fn sample() -> StructLayout {
        StructLayout::new(
            "rte_mbuf".to_string(),
            101,
            vec![
                LayoutRecord::new(0, "BufAddr".to_string(), "IntPtr".to_string(), 8),
                LayoutRecord::new(64, "RearmData".to_string(), "uint64_t".to_string(), 8),
            ],
        )
    }

    #[test]
    fn test_plain_rows_match_generator_contract() {
        let text = ReportFormatter::new().format_plain(&sample());
        assert_eq!(text, "0 BufAddr IntPtr 8\n64 RearmData uint64_t 8");
    }

    #[test]
    fn test_report_header_carries_declaration_line() {
        let text = ReportFormatter::new().with_color(false).format(&sample());
        assert!(text.contains("struct rte_mbuf (declared at line 101)"));
        assert!(text.contains("2 fields, 72 bytes spanned"));
    }

    #[test]
    fn test_rows_are_aligned() {
        let text = ReportFormatter::new().with_color(false).format(&sample());
        let rows: Vec<&str> = text
            .lines()
            .filter(|l| l.contains("IntPtr") || l.contains("uint64_t"))
            .collect();
        assert_eq!(rows.len(), 2);
        let col = |s: &str| s.find("BufAddr").or_else(|| s.find("RearmData")).unwrap();
        assert_eq!(col(rows[0]), col(rows[1]));
    }
}
