//! File lookup for raw PDF and image downloads.
//!
//! A presentation layer exposes two download routes per lesson:
//!
//! ```text
//! /lesson/<lesson>/download/<path>                      → <lesson>/<path>
//! /lesson/<lesson>/download/images/<vendor>/<filename>  → <lesson>/images/<vendor>/<filename>
//! ```
//!
//! These functions map such requests onto the filesystem and check the file
//! is there. Every segment must be a single plain path component, so a
//! request can only ever reach files inside its lesson directory. A PDF may
//! sit in a subdirectory (`build/out.pdf`), matching what the config can
//! declare.

use crate::catalog::IMAGES_DIR;
use crate::root::{LessonRoot, is_plain_segment, relative_segments};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DownloadError {
    #[error("Lesson {0} does not exist")]
    LessonNotFound(String),
    #[error("Download file {0} does not exist")]
    NotFound(String),
}

/// Resolve a `/`-separated path relative to the lesson directory (usually a
/// PDF).
pub fn resolve_pdf(
    root: &LessonRoot,
    lesson: &str,
    filename: &str,
) -> Result<PathBuf, DownloadError> {
    let lesson_dir = root
        .lesson_dir(lesson)
        .ok_or_else(|| DownloadError::LessonNotFound(lesson.to_string()))?;
    let segments = relative_segments(filename)
        .ok_or_else(|| DownloadError::NotFound(filename.to_string()))?;
    existing_file(lesson_dir, &segments)
}

/// Resolve an image under `images/<vendor>/` in the lesson directory.
///
/// `vendor` is the image directory name, i.e. the lowercased engine name.
pub fn resolve_image(
    root: &LessonRoot,
    lesson: &str,
    vendor: &str,
    filename: &str,
) -> Result<PathBuf, DownloadError> {
    let lesson_dir = root
        .lesson_dir(lesson)
        .ok_or_else(|| DownloadError::LessonNotFound(lesson.to_string()))?;
    existing_file(lesson_dir.join(IMAGES_DIR), &[vendor, filename])
}

fn existing_file(base: PathBuf, segments: &[&str]) -> Result<PathBuf, DownloadError> {
    let requested = segments.join("/");
    if !segments.iter().all(|s| is_plain_segment(s)) {
        return Err(DownloadError::NotFound(requested));
    }
    let path = segments.iter().fold(base, |path, s| path.join(s));
    if path.is_file() {
        Ok(path)
    } else {
        Err(DownloadError::NotFound(requested))
    }
}
