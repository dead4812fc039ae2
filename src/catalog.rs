//! Lesson catalog assembly.
//!
//! Turns one lesson directory into a [`LessonCatalog`]: which PDFs each
//! engine produced, their declared build status, and the screenshots to show
//! next to them.
//!
//! ## Lesson Layout
//!
//! ```text
//! lessons/                         # Lesson root
//! └── typography-101/              # Lesson (id = directory name)
//!     ├── conversion.ini           # Per-engine build results (optional)
//!     ├── README.rst               # Shown verbatim (optional)
//!     ├── styles.css               # Presentation hint (optional)
//!     ├── typography-pdfreactor.pdf
//!     └── images/
//!         ├── pdfreactor/
//!         │   ├── page-1.png
//!         │   └── thumb-page-1.png # Thumbnail, never listed
//!         └── princexml/
//!             └── ...
//! ```
//!
//! ## Fatal vs. Advisory
//!
//! Only two things fail a build: a lesson that does not exist and a config
//! file that cannot be read as a whole. Everything the filesystem disagrees
//! with the config about is a [`Diagnostic`]:
//!
//! | Condition | Result |
//! |-----------|--------|
//! | Lesson directory missing | [`CatalogError::LessonNotFound`] |
//! | `conversion.ini` missing | defaults, no engine records |
//! | Engine section missing `pdf`/`status`/`message` | [`CatalogError::Config`] |
//! | Declared PDF missing on disk | record kept, [`Diagnostic::MissingPdf`] |
//! | Declared PDF path leaves the lesson directory | record kept, [`Diagnostic::UndownloadablePdf`] |
//! | Image directory missing | no images, [`Diagnostic::MissingImageDirectory`] |
//! | Image directory empty after filtering | no images, [`Diagnostic::NoImages`] |
//!
//! The config's status and message are what the viewer sees; the PDF check is
//! a cross-check for the operator. A page can list a PDF that is still being
//! built.

use crate::config::{self, ConfigError, EngineSection, LessonSettings};
use crate::engine::Engine;
use crate::root::{LessonRoot, relative_segments};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the README shown on the lesson page.
pub const README_FILENAME: &str = "README.rst";

/// Stylesheet whose presence sets [`LessonCatalog::has_css`].
pub const STYLESHEET_FILENAME: &str = "styles.css";

/// Directory under the lesson holding one image directory per engine.
pub const IMAGES_DIR: &str = "images";

/// Prefix of generated thumbnails, excluded from image listings.
pub const THUMBNAIL_PREFIX: &str = "thumb-";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Lesson {0} does not exist")]
    LessonNotFound(String),
    #[error("Config error in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Build results for one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineRecord {
    pub name: Engine,
    /// PDF path relative to the lesson directory, as declared in the config.
    /// Accepted by [`crate::download::resolve_pdf`] unless a
    /// [`Diagnostic::UndownloadablePdf`] was reported for it.
    pub pdf_file: String,
    pub status: String,
    pub message: String,
    /// Image filenames in `images/<engine>/`, sorted, thumbnails excluded.
    pub images: Vec<String>,
}

/// Structured description of a lesson's downloadable artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonCatalog {
    pub name: String,
    /// One record per engine section, in config file order.
    pub engine_records: Vec<EngineRecord>,
    pub has_css: bool,
    pub mode: String,
    pub category: String,
}

impl LessonCatalog {
    /// The record for `engine`, if the config declared one.
    pub fn engine(&self, engine: Engine) -> Option<&EngineRecord> {
        self.engine_records.iter().find(|r| r.name == engine)
    }
}

/// A non-fatal disagreement between the config and the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The config names a PDF that is not on disk.
    MissingPdf { engine: Engine, path: PathBuf },
    /// The config names a PDF outside the lesson directory (absolute, or
    /// through `..`), so no download link can reach it.
    UndownloadablePdf { engine: Engine, path: PathBuf },
    /// The engine has no image directory.
    MissingImageDirectory { engine: Engine, path: PathBuf },
    /// The image directory holds nothing but thumbnails (or nothing at all).
    NoImages { engine: Engine, path: PathBuf },
}

impl Diagnostic {
    pub fn engine(&self) -> Engine {
        match self {
            Diagnostic::MissingPdf { engine, .. }
            | Diagnostic::UndownloadablePdf { engine, .. }
            | Diagnostic::MissingImageDirectory { engine, .. }
            | Diagnostic::NoImages { engine, .. } => *engine,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingPdf { engine, path } => {
                write!(f, "{engine}: no PDF file {}", path.display())
            }
            Diagnostic::UndownloadablePdf { engine, path } => {
                write!(
                    f,
                    "{engine}: PDF path {} is outside the lesson directory",
                    path.display()
                )
            }
            Diagnostic::MissingImageDirectory { engine, path } => {
                write!(f, "{engine}: no image directory {}", path.display())
            }
            Diagnostic::NoImages { engine, path } => {
                write!(f, "{engine}: no images found in {}", path.display())
            }
        }
    }
}

/// A built catalog plus the values that travel next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonView {
    pub catalog: LessonCatalog,
    /// `README.rst` contents, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds lesson catalogs from a validated lesson root.
///
/// Holds no state besides the root, so one builder can serve any number of
/// concurrent builds.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    root: LessonRoot,
}

impl CatalogBuilder {
    pub fn new(root: LessonRoot) -> Self {
        Self { root }
    }

    /// Build the catalog for `lesson` from the current state of the tree.
    pub fn build(&self, lesson: &str) -> Result<LessonView, CatalogError> {
        let lesson_dir = self
            .root
            .lesson_dir(lesson)
            .ok_or_else(|| CatalogError::LessonNotFound(lesson.to_string()))?;

        let config_path = lesson_dir.join(config::CONFIG_FILENAME);
        let lesson_config =
            config::read_config(&config_path).map_err(|source| CatalogError::Config {
                path: config_path.clone(),
                source,
            })?;
        let LessonSettings { mode, category } = lesson_config.settings;

        let mut diagnostics = Vec::new();
        let engine_records = lesson_config
            .sections
            .into_iter()
            .map(|section| build_record(&lesson_dir, section, &mut diagnostics))
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = LessonCatalog {
            name: lesson.to_string(),
            engine_records,
            has_css: lesson_dir.join(STYLESHEET_FILENAME).exists(),
            mode,
            category,
        };

        Ok(LessonView {
            catalog,
            readme: read_readme(&lesson_dir)?,
            diagnostics,
        })
    }
}

fn build_record(
    lesson_dir: &Path,
    section: EngineSection,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<EngineRecord, CatalogError> {
    let engine = section.engine;

    match relative_segments(&section.pdf) {
        Some(segments) => {
            let pdf_path = segments.iter().fold(lesson_dir.to_path_buf(), |p, s| p.join(s));
            if !pdf_path.is_file() {
                diagnostics.push(Diagnostic::MissingPdf {
                    engine,
                    path: pdf_path,
                });
            }
        }
        None => diagnostics.push(Diagnostic::UndownloadablePdf {
            engine,
            path: PathBuf::from(&section.pdf),
        }),
    }

    let image_dir = lesson_dir.join(IMAGES_DIR).join(engine.image_dir_name());
    let images = if image_dir.is_dir() {
        let images = list_images(&image_dir)?;
        if images.is_empty() {
            diagnostics.push(Diagnostic::NoImages {
                engine,
                path: image_dir,
            });
        }
        images
    } else {
        diagnostics.push(Diagnostic::MissingImageDirectory {
            engine,
            path: image_dir,
        });
        Vec::new()
    };

    Ok(EngineRecord {
        name: engine,
        pdf_file: section.pdf,
        status: section.status,
        message: section.message,
        images,
    })
}

/// Entry names in `dir`, sorted, with thumbnails removed.
///
/// Names that are not valid UTF-8 cannot be addressed by a download link and
/// are skipped.
fn list_images(dir: &Path) -> Result<Vec<String>, io::Error> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();
    names.retain(|name| !name.starts_with(THUMBNAIL_PREFIX));
    Ok(names)
}

fn read_readme(lesson_dir: &Path) -> Result<Option<String>, io::Error> {
    match fs::read_to_string(lesson_dir.join(README_FILENAME)) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
