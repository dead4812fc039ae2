//! # Lesson Catalog
//!
//! Builds a structured catalog of a lesson's generated PDFs and screenshots
//! from a lesson directory tree. The filesystem is the data source: each
//! lesson is a directory, and its `conversion.ini` records which PDF every
//! rendering engine produced and how the build went.
//!
//! ```text
//! lessons/typography-101/
//! ├── conversion.ini        →  settings + one record per engine section
//! ├── README.rst            →  shown verbatim
//! ├── styles.css            →  has_css
//! ├── *.pdf                 →  checked, never required
//! └── images/<engine>/      →  sorted gallery, thumb-* excluded
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Builds a [`catalog::LessonView`] (catalog, README, diagnostics) for one lesson |
//! | [`config`] | Reads `conversion.ini` into settings and engine sections |
//! | [`ini`] | The INI dialect `conversion.ini` is written in |
//! | [`engine`] | The closed set of PDF rendering engines |
//! | [`root`] | Validated lesson root and traversal-safe path resolution |
//! | [`download`] | Resolves raw PDF/image download requests to files |
//! | [`render`] | Standalone HTML lesson page using Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Config Status Over Filesystem State
//!
//! The build pipeline writes `conversion.ini` while PDFs may still be in
//! flight. A PDF that the config lists but the disk lacks is reported as a
//! [`catalog::Diagnostic`], not an error, so a lesson page can show "expected
//! but not built yet". A config that cannot be read completely is fatal:
//! a half-read engine record would misreport build status.
//!
//! ## No Caching
//!
//! Every build re-reads the config and re-lists image directories. Lessons
//! are small and rarely requested, and nothing can go stale.
//!
//! ## Explicit Lesson Root
//!
//! The lesson root is validated once into a [`root::LessonRoot`] and handed
//! to the [`catalog::CatalogBuilder`]. Nothing reads it from the environment
//! after startup.

pub mod catalog;
pub mod config;
pub mod download;
pub mod engine;
pub mod ini;
pub mod output;
pub mod render;
pub mod root;

#[cfg(test)]
pub(crate) mod test_helpers;
