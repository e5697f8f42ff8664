//! Baseline retrieval from the git object database.
//!
//! The pipeline diffs the live buffer against the file's blob in HEAD.
//! Every failure mode here is recoverable: a file outside a repository,
//! untracked, absent from HEAD, or stored as a non-UTF-8 blob simply
//! diffs against an empty baseline, so the whole buffer shows as added.

use std::path::{Path, PathBuf};

use git2::Repository;
use thiserror::Error;

/// Why a baseline could not be read.
#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("not inside a git repository")]
    NotARepo,
    #[error("file does not exist in HEAD")]
    NotInHead,
    #[error("baseline blob is not valid UTF-8")]
    NotText,
    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

fn absolute(path: &Path) -> PathBuf {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    // Resolve symlinks (on macOS /var -> /private/var) so the workdir
    // prefix strips cleanly.
    abs.canonicalize().unwrap_or(abs)
}

/// Read the file's content as of HEAD.
pub fn head_content(path: &Path) -> Result<String, BaselineError> {
    let abs_path = absolute(path);
    let repo = Repository::discover(&abs_path).map_err(|_| BaselineError::NotARepo)?;
    let workdir = repo.workdir().ok_or(BaselineError::NotARepo)?;
    let relative = abs_path
        .strip_prefix(workdir)
        .map_err(|_| BaselineError::NotARepo)?;

    let head = repo.head()?;
    let tree = head.peel_to_commit()?.tree()?;
    let entry = tree
        .get_path(relative)
        .map_err(|_| BaselineError::NotInHead)?;
    let blob = repo.find_blob(entry.id())?;

    match std::str::from_utf8(blob.content()) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => Err(BaselineError::NotText),
    }
}

/// Baseline for diffing. An unavailable baseline is valid and empty:
/// the document then diffs as everything-added.
pub fn fetch_baseline(path: &Path) -> String {
    match head_content(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "baseline unavailable, using empty");
            String::new()
        }
    }
}
