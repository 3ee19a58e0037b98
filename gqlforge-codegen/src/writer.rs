//! Persisting rendered files
//!
//! A run is all-or-nothing. Collisions are checked across every rendered file
//! before anything touches the disk, and a failed write restores the files
//! already written in the same run.

use crate::backends::GeneratedFile;
use crate::error::GeneratorError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Fails when two rendered files target the same path.
pub fn check_collisions(files: &[GeneratedFile]) -> Result<(), GeneratorError> {
    let mut seen: HashMap<&Path, &str> = HashMap::with_capacity(files.len());
    for file in files {
        if let Some(first) = seen.insert(file.path.as_path(), file.origin.as_str()) {
            return Err(GeneratorError::NameCollision {
                name: file.path.display().to_string(),
                first: first.to_string(),
                second: file.origin.clone(),
            });
        }
    }
    Ok(())
}

/// What a path held before this run touched it
enum Previous {
    Absent,
    Content(Vec<u8>),
}

/// Writes generated files below an output root
#[derive(Debug, Clone)]
pub struct CodeWriter {
    root: PathBuf,
}

impl CodeWriter {
    /// Creates a writer for `root`. Nothing is created until [`write_all`](Self::write_all).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes every file and returns their full paths, in order.
    ///
    /// On failure, files written earlier in the call are restored to their
    /// previous content (or removed if they did not exist).
    pub fn write_all(&self, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, GeneratorError> {
        check_collisions(files)?;

        let mut written: Vec<(PathBuf, Previous)> = Vec::with_capacity(files.len());
        for file in files {
            let target = self.root.join(&file.path);
            match write_one(&target, &file.content) {
                Ok(previous) => {
                    tracing::debug!(path = %target.display(), origin = %file.origin, "wrote file");
                    written.push((target, previous));
                }
                Err(err) => {
                    tracing::warn!(
                        path = %target.display(),
                        error = %err,
                        rolled_back = written.len(),
                        "write failed, rolling back"
                    );
                    rollback(written);
                    return Err(err.into());
                }
            }
        }

        Ok(written.into_iter().map(|(path, _)| path).collect())
    }
}

fn write_one(target: &Path, content: &str) -> std::io::Result<Previous> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let previous = match fs::read(target) {
        Ok(bytes) => Previous::Content(bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Previous::Absent,
        Err(err) => return Err(err),
    };
    fs::write(target, content)?;
    Ok(previous)
}

fn rollback(written: Vec<(PathBuf, Previous)>) {
    for (path, previous) in written.into_iter().rev() {
        let result = match previous {
            Previous::Absent => fs::remove_file(&path),
            Previous::Content(bytes) => fs::write(&path, bytes),
        };
        if let Err(err) = result {
            tracing::warn!(path = %path.display(), error = %err, "could not roll back file");
        }
    }
}
