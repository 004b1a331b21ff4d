//! Finds the installed documentation tree on local storage.

use std::path::{Path, PathBuf};

use super::DocsError;
use crate::config::{settings, LauncherConfig};

/// Directory name searched for next to the executable and in the data dir.
const DOCS_DIR: &str = "docs";

/// A documentation root that is known to contain its index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsTree {
    root: PathBuf,
    index: PathBuf,
}

impl DocsTree {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index(&self) -> &Path {
        &self.index
    }
}

/// Ordered list of candidate roots, first match wins.
#[derive(Debug, Clone)]
pub struct DocsLocator {
    candidates: Vec<PathBuf>,
    index_file: String,
}

impl DocsLocator {
    pub fn new(candidates: Vec<PathBuf>, index_file: impl Into<String>) -> Self {
        Self {
            candidates,
            index_file: index_file.into(),
        }
    }

    /// An explicit `docs_root` disables the default search.
    pub fn from_config(config: &LauncherConfig) -> Self {
        let candidates = match &config.docs_root {
            Some(root) => vec![root.clone()],
            None => default_candidates(),
        };
        Self::new(candidates, config.index_file.clone())
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    pub fn locate(&self) -> Result<DocsTree, DocsError> {
        for root in &self.candidates {
            let index = root.join(&self.index_file);
            if index.is_file() {
                tracing::debug!("Found documentation index at {:?}", index);
                let root = std::path::absolute(root)
                    .map_err(|e| DocsError::Io(e, root.clone()))?;
                let index = root.join(&self.index_file);
                return Ok(DocsTree { root, index });
            }
            tracing::debug!("No documentation index at {:?}", index);
        }
        Err(DocsError::NotFound {
            searched: self.candidates.clone(),
        })
    }
}

/// `<exe dir>/docs`, `<exe dir>/../share/docs-launcher/docs`, then the
/// per-user data directory.
fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(DOCS_DIR));
        if let Some(prefix) = exe_dir.parent() {
            candidates.push(
                prefix
                    .join("share")
                    .join(env!("CARGO_PKG_NAME"))
                    .join(DOCS_DIR),
            );
        }
    }
    if let Some(dirs) = settings::project_dirs() {
        candidates.push(dirs.data_dir().join(DOCS_DIR));
    }
    candidates
}
