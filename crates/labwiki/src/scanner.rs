//! Annotation extraction from the host script's source text.
//!
//! A marker line is any source line whose left-stripped content starts with
//! the marker prefix (`#@` by default). The scanner turns runs of marker
//! lines into text blocks keyed by line number, which later share one
//! keyspace with artifact-registration positions.

use crate::store::Position;

/// Default marker prefix for annotation lines.
pub const DEFAULT_MARKER: &str = "#@";

/// How marker lines map to content fragments.
///
/// Two historical keying schemes exist; both are configurations of the same
/// scanner. [`ScanMode::MergeAdjacent`] is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Consecutive marker lines merge into one paragraph keyed by the run's
    /// last line number.
    #[default]
    MergeAdjacent,
    /// Every marker line becomes its own fragment keyed by its own line
    /// number.
    PerLine,
}

/// Scans source text for annotation marker lines.
#[derive(Debug, Clone)]
pub struct AnnotationScanner {
    marker: String,
    mode: ScanMode,
}

impl Default for AnnotationScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationScanner {
    /// Scanner with the default `#@` marker and merge-adjacent keying.
    pub fn new() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            mode: ScanMode::default(),
        }
    }

    /// Use a different marker prefix.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Use a different keying mode.
    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    /// Extract annotation blocks from `source`.
    ///
    /// Line numbers are 1-based, matching the call-site line numbers used
    /// for artifact positions. Blocks come back in source order; each
    /// block's text is wrapped in a leading and trailing line break so it
    /// stands alone as a paragraph in the final document.
    pub fn scan(&self, source: &str) -> Vec<(Position, String)> {
        match self.mode {
            ScanMode::MergeAdjacent => self.scan_merged(source),
            ScanMode::PerLine => self.scan_per_line(source),
        }
    }

    /// The marker-stripped, trimmed text of a marker line, or `None` for a
    /// non-marker line. The marker is matched after stripping indentation.
    fn marker_text<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.trim_start().strip_prefix(&self.marker).map(str::trim)
    }

    fn scan_merged(&self, source: &str) -> Vec<(Position, String)> {
        let mut blocks = Vec::new();
        let mut acc = String::new();
        // Sentinel far enough below line 1 that the first marker line can
        // never look adjacent to it.
        let mut last_line: i64 = -5;

        for (k, line) in (1i64..).zip(source.lines()) {
            let Some(text) = self.marker_text(line) else {
                continue;
            };

            if last_line + 1 == k {
                acc.push(' ');
                acc.push_str(text);
            } else {
                if !acc.is_empty() {
                    blocks.push((last_line as Position, wrap(&acc)));
                }
                acc = text.to_string();
            }
            last_line = k;
        }

        if !acc.is_empty() {
            blocks.push((last_line as Position, wrap(&acc)));
        }

        blocks
    }

    fn scan_per_line(&self, source: &str) -> Vec<(Position, String)> {
        (1u32..)
            .zip(source.lines())
            .filter_map(|(k, line)| {
                let text = self.marker_text(line)?;
                if text.is_empty() {
                    None
                } else {
                    Some((k, wrap(text)))
                }
            })
            .collect()
    }
}

fn wrap(text: &str) -> String {
    format!("\n{text}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_marker_lines() {
        let scanner = AnnotationScanner::new();
        assert!(scanner.scan("x = 1\ny = 2\n").is_empty());
    }

    #[test]
    fn test_single_marker_line() {
        let scanner = AnnotationScanner::new();
        let blocks = scanner.scan("x = 1\n#@ hello\ny = 2\n");
        assert_eq!(blocks, vec![(2, "\nhello\n".to_string())]);
    }

    #[test]
    fn test_adjacent_lines_merge_keyed_by_last() {
        // Lines 3 and 4 form one run; line 7 starts a new one.
        let source = "a\nb\n#@ hello\n#@ world\nc\nd\n#@ again\n";
        let blocks = AnnotationScanner::new().scan(source);
        assert_eq!(
            blocks,
            vec![
                (4, "\nhello world\n".to_string()),
                (7, "\nagain\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_line_breaks_a_run() {
        let source = "#@ one\n\n#@ two\n";
        let blocks = AnnotationScanner::new().scan(source);
        assert_eq!(
            blocks,
            vec![(1, "\none\n".to_string()), (3, "\ntwo\n".to_string())]
        );
    }

    #[test]
    fn test_indented_marker_counts() {
        let source = "if x:\n    #@ inside a branch\n";
        let blocks = AnnotationScanner::new().scan(source);
        assert_eq!(blocks, vec![(2, "\ninside a branch\n".to_string())]);
    }

    #[test]
    fn test_marker_at_first_line() {
        let blocks = AnnotationScanner::new().scan("#@ opening remark\ncode\n");
        assert_eq!(blocks, vec![(1, "\nopening remark\n".to_string())]);
    }

    #[test]
    fn test_run_ending_at_eof_is_flushed() {
        let blocks = AnnotationScanner::new().scan("code\n#@ tail one\n#@ tail two");
        assert_eq!(blocks, vec![(3, "\ntail one tail two\n".to_string())]);
    }

    #[test]
    fn test_custom_marker() {
        let scanner = AnnotationScanner::new().with_marker("//@");
        let blocks = scanner.scan("//@ rust style\nlet x = 1;\n");
        assert_eq!(blocks, vec![(1, "\nrust style\n".to_string())]);
    }

    #[test]
    fn test_per_line_mode_keys_each_line() {
        let scanner = AnnotationScanner::new().with_mode(ScanMode::PerLine);
        let blocks = scanner.scan("#@ one\n#@ two\n");
        assert_eq!(
            blocks,
            vec![(1, "\none\n".to_string()), (2, "\ntwo\n".to_string())]
        );
    }
}
