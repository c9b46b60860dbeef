pub mod apply;
pub mod compile;
pub mod export;
pub mod init;
pub mod pull;
pub mod push;

pub use apply::{apply, ApplyArgs};
pub use compile::{compile, CompileArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use pull::{pull, PullArgs};
pub use push::{push, PushArgs};

use anyhow::{Context, Result};
use pagecraft_editor::{Document, PageIdentifier};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a user-supplied path against the working directory
pub(crate) fn resolve(cwd: &str, path: &str) -> PathBuf {
    PathBuf::from(cwd).join(path)
}

pub(crate) fn read_document(path: &Path) -> Result<Document> {
    debug!(path = %path.display(), "Reading page document");
    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    Document::from_json(&content).with_context(|| format!("Invalid page document in {}", path.display()))
}

pub(crate) fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("Cannot write {}", path.display()))
}

pub(crate) fn page_identifier(stable: &str, legacy: Option<&str>) -> PageIdentifier {
    match legacy {
        Some(legacy) => PageIdentifier::new(stable).with_legacy(legacy),
        None => PageIdentifier::new(stable),
    }
}
