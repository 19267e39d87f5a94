//! Driver: per-file parse invocation and multi-file AST assembly.
//!
//! One file in, one File node out; many files in, one synthetic AST root
//! holding a File child per readable input, with errors totalled across
//! the batch. Files that cannot be read are logged and skipped without
//! failing the batch.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::ast::{Node, NodeKind, build_named};
use crate::base::Span;
use crate::parser::{SyntaxError, parse};

/// Name carried by the synthetic multi-file root.
const AST_ROOT_NAME: &str = "__AST__";

/// I/O-level failures of the driver. Parse errors are never surfaced here;
/// they are recovered past and counted on the [`ParsedFile`].
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of parsing a single file: the File root plus every syntax error
/// recovered past while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub root: Node,
    pub errors: Vec<SyntaxError>,
}

impl ParsedFile {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Parse in-memory source into a File node named after its origin.
pub fn parse_source(name: &str, source: &str) -> ParsedFile {
    debug!(file = name, "parsing");
    let output = parse(source);
    let root = build_named(NodeKind::File, name, Span::default(), output.contributions);
    ParsedFile {
        root,
        errors: output.errors,
    }
}

/// Read and parse one file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParsedFile, DriverError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_source(&path.to_string_lossy(), &source))
}

/// Parse a batch of files under one synthetic AST root.
///
/// Unreadable files are logged and skipped; the returned count is the total
/// number of syntax errors across every file that parsed.
pub fn parse_files(paths: impl IntoIterator<Item = impl AsRef<Path>>) -> (Node, usize) {
    let mut children = Vec::new();
    let mut total_errors = 0;
    for path in paths {
        match parse_file(&path) {
            Ok(parsed) => {
                total_errors += parsed.error_count();
                children.push(parsed.root.into());
            }
            Err(err) => warn!(error = %err, "skipping input"),
        }
    }
    let root = build_named(NodeKind::Ast, AST_ROOT_NAME, Span::default(), children);
    (root, total_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SOURCE: &str = "// Copyright.\n/* Doc. */\nenum Color { RED, GREEN = 2 };\n";

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_source_names_file_root() {
        let parsed = parse_source("color.idl", SOURCE);
        assert_eq!(parsed.root.kind, NodeKind::File);
        assert_eq!(parsed.root.name(), Some("color.idl"));
        assert_eq!(parsed.error_count(), 0);
        let kinds: Vec<_> = parsed.root.child_nodes().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Copyright, NodeKind::Comment, NodeKind::Enum]
        );
    }

    #[test]
    fn test_parse_source_counts_errors() {
        let parsed = parse_source("bad.idl", "enum E { A, 42 };\n");
        assert!(parsed.error_count() >= 1);
        // The tree is still produced best-effort.
        assert!(parsed.root.child_nodes().any(|n| n.kind == NodeKind::Enum));
    }

    #[test]
    fn test_parse_file_reads_from_disk() {
        let file = write_temp(SOURCE);
        let parsed = parse_file(file.path()).unwrap();
        assert_eq!(parsed.root.kind, NodeKind::File);
        assert_eq!(parsed.error_count(), 0);
    }

    #[test]
    fn test_parse_file_missing_is_read_error() {
        let err = parse_file("/no/such/file.idl").unwrap_err();
        assert!(matches!(err, DriverError::Read { .. }));
        assert!(err.to_string().contains("/no/such/file.idl"));
    }

    #[test]
    fn test_parse_files_assembles_ast_root() {
        let a = write_temp(SOURCE);
        let b = write_temp("// Copyright.\n/* Doc. */\nlabel Chrome { M13 = 0.0 };\n");
        let (root, errors) = parse_files([a.path(), b.path()]);
        assert_eq!(root.kind, NodeKind::Ast);
        assert_eq!(root.name(), Some("__AST__"));
        assert_eq!(errors, 0);
        assert_eq!(root.child_nodes().count(), 2);
        assert!(root.child_nodes().all(|n| n.kind == NodeKind::File));
    }

    #[test]
    fn test_parse_files_skips_unreadable_and_totals_errors() {
        let good = write_temp("// Copyright.\n/* Doc. */\nenum E { 42 };\n");
        let paths = [good.path(), Path::new("/no/such/file.idl")];
        let (root, errors) = parse_files(paths);
        assert_eq!(root.child_nodes().count(), 1);
        assert_eq!(errors, 1);
    }
}
