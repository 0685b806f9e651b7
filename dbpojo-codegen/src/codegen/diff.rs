//! Compare generated sources while ignoring the generation marker line

use std::path::PathBuf;

use super::pojo_generator::GeneratorOptions;
use super::pojo_renderer::{render_descriptor, GENERATED_MARKER};
use crate::error::Result;
use crate::parser::SchemaDescriptor;

/// First line where two renderings disagree (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDifference {
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

/// How a file on disk differs from a fresh rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift {
    Missing(PathBuf),
    Changed(PathBuf, LineDifference),
}

/// Find the first differing line, skipping any line pair where either side
/// carries the generation marker
pub fn first_difference(expected: &str, actual: &str) -> Option<LineDifference> {
    let mut expected_lines = expected.lines();
    let mut actual_lines = actual.lines();
    let mut line = 0;

    loop {
        line += 1;
        match (expected_lines.next(), actual_lines.next()) {
            (None, None) => return None,
            (Some(e), Some(a)) => {
                if e == a || e.contains(GENERATED_MARKER) || a.contains(GENERATED_MARKER) {
                    continue;
                }
                return Some(LineDifference {
                    line,
                    expected: Some(e.to_string()),
                    actual: Some(a.to_string()),
                });
            }
            (e, a) => {
                return Some(LineDifference {
                    line,
                    expected: e.map(str::to_string),
                    actual: a.map(str::to_string),
                })
            }
        }
    }
}

/// Compare a descriptor's files on disk against a fresh rendering
pub fn check_descriptor(desc: &SchemaDescriptor, options: &GeneratorOptions) -> Result<Vec<Drift>> {
    let mut drifts = Vec::new();

    for file in render_descriptor(desc, options)? {
        let path = options.output_dir.join(&file.relative_path);
        if !path.exists() {
            drifts.push(Drift::Missing(path));
            continue;
        }

        let on_disk = std::fs::read_to_string(&path)?;
        if let Some(diff) = first_difference(&file.content, &on_disk) {
            drifts.push(Drift::Changed(path, diff));
        }
    }

    Ok(drifts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_line_is_ignored() {
        let a = "/**\n * Code generated by dbpojo on 2024-01-01.\n */\nclass A {}\n";
        let b = "/**\n * Code generated by dbpojo on 2025-06-30.\n */\nclass A {}\n";
        assert_eq!(first_difference(a, b), None);
    }

    #[test]
    fn test_reports_first_changed_line() {
        let diff = first_difference("a\nb\nc\n", "a\nx\nc\n").unwrap();
        assert_eq!(diff.line, 2);
        assert_eq!(diff.expected.as_deref(), Some("b"));
        assert_eq!(diff.actual.as_deref(), Some("x"));
    }

    #[test]
    fn test_length_mismatch() {
        let diff = first_difference("a\nb\n", "a\n").unwrap();
        assert_eq!(diff.line, 2);
        assert_eq!(diff.expected.as_deref(), Some("b"));
        assert_eq!(diff.actual, None);
    }
}
