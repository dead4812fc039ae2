//! The lesson root directory and safe resolution of paths beneath it.
//!
//! A [`LessonRoot`] is validated once at startup and then only read. Lesson
//! ids and download filenames come from outside (request paths, CLI
//! arguments), so every join goes through [`LessonRoot::lesson_dir`] or
//! [`is_plain_segment`] and can never climb out of the root.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RootError {
    #[error("Lesson root does not exist: {}", .0.display())]
    Missing(PathBuf),
    #[error("Lesson root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A validated, canonicalized lesson root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRoot {
    path: PathBuf,
}

impl LessonRoot {
    /// Validate that `path` exists and is a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RootError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RootError::Missing(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(RootError::NotADirectory(path.to_path_buf()));
        }
        Ok(Self {
            path: path.canonicalize()?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve an existing lesson directory.
    ///
    /// Returns `None` when `lesson` is not a single plain path segment, when
    /// the directory does not exist, or when it resolves (through symlinks)
    /// to somewhere outside the root.
    pub fn lesson_dir(&self, lesson: &str) -> Option<PathBuf> {
        if !is_plain_segment(lesson) {
            return None;
        }
        let dir = self.path.join(lesson);
        if !dir.is_dir() {
            return None;
        }
        let resolved = dir.canonicalize().ok()?;
        resolved.starts_with(&self.path).then_some(dir)
    }

    /// Names of all lesson directories, sorted. Hidden directories are skipped.
    pub fn lessons(&self) -> Result<Vec<String>, RootError> {
        let mut names: Vec<String> = fs::read_dir(&self.path)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();
        Ok(names)
    }
}

/// True if `segment` is exactly one normal path component.
///
/// Rejects empty strings, `.`, `..`, absolute paths and anything containing
/// a path separator.
pub fn is_plain_segment(segment: &str) -> bool {
    if segment.is_empty() || segment.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Split a `/`-separated relative path into plain segments.
///
/// Returns `None` if any segment is not plain, which covers absolute paths,
/// `..` and empty segments (`a//b`, trailing `/`).
pub fn relative_segments(path: &str) -> Option<Vec<&str>> {
    path.split('/')
        .map(|segment| is_plain_segment(segment).then_some(segment))
        .collect()
}
