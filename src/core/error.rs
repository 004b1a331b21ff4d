//! Defines the error type shared by the delivery strategies.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for documentation delivery.
///
/// Both delivery strategies report failures through this enum, which lets the
/// dispatcher hand the error back to its caller without translating it.
#[derive(Debug, Error)]
pub enum DocsError {
    /// No candidate directory contained the documentation index.
    #[error("documentation not found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    /// The documentation server could not bind its listening address.
    #[error("could not bind documentation server to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The async runtime backing the documentation server failed to start.
    #[error("failed to start the server runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The interrupt handler could not be installed.
    #[error("failed to listen for the interrupt signal: {0}")]
    Signal(#[source] std::io::Error),

    /// The host refused to open the target with its default application.
    #[error("failed to open {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// A path could not be expressed as a `file://` URL.
    #[error("cannot build a file URL for {0}")]
    InvalidPath(PathBuf),

    /// Represents an I/O error, typically from file system operations.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no candidate locations".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_every_candidate() {
        let err = DocsError::NotFound {
            searched: vec![PathBuf::from("/a/docs"), PathBuf::from("/b/docs")],
        };
        assert_eq!(
            err.to_string(),
            "documentation not found (searched: /a/docs, /b/docs)"
        );
    }

    #[test]
    fn not_found_without_candidates() {
        let err = DocsError::NotFound { searched: vec![] };
        assert!(err.to_string().contains("no candidate locations"));
    }

    #[test]
    fn bind_error_keeps_source() {
        use std::error::Error as _;
        let err = DocsError::Bind {
            addr: "127.0.0.1:8000".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        assert!(err
            .to_string()
            .starts_with("could not bind documentation server to 127.0.0.1:8000"));
        assert!(err.source().is_some());
    }
}
