//! Shared test utilities for the lesson-catalog test suite.
//!
//! Provides a throwaway lesson tree builder and lookup helpers that panic
//! with a useful message instead of a bare `unwrap` failure.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let fixture = LessonFixture::new();
//! fixture
//!     .lesson("intro")
//!     .config("[PDFreactor]\npdf = out.pdf\nstatus = 0\nmessage = ok\n")
//!     .images("pdfreactor", &["a.png", "thumb-a.png"]);
//!
//! let catalog = fixture.builder().build("intro").unwrap().catalog;
//! assert_eq!(find_record(&catalog, Engine::PdfReactor).images, vec!["a.png"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::catalog::{CatalogBuilder, EngineRecord, LessonCatalog};
use crate::config::CONFIG_FILENAME;
use crate::engine::Engine;
use crate::root::LessonRoot;

// =========================================================================
// Lesson tree fixtures
// =========================================================================

/// A temporary lesson root. Deleted when dropped.
pub struct LessonFixture {
    _tmp: TempDir,
    root: PathBuf,
}

impl LessonFixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        // Canonical so expected paths match what the builder reports
        let root = tmp.path().canonicalize().unwrap();
        Self { _tmp: tmp, root }
    }

    /// Create (or reopen) a lesson directory.
    pub fn lesson(&self, name: &str) -> LessonDir {
        let path = self.root.join(name);
        fs::create_dir_all(&path).unwrap();
        LessonDir { path }
    }

    pub fn lesson_root(&self) -> LessonRoot {
        LessonRoot::open(&self.root).unwrap()
    }

    pub fn builder(&self) -> CatalogBuilder {
        CatalogBuilder::new(self.lesson_root())
    }
}

/// Builder-style writer for one lesson directory.
pub struct LessonDir {
    path: PathBuf,
}

impl LessonDir {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `conversion.ini`.
    pub fn config(self, content: &str) -> Self {
        self.file(CONFIG_FILENAME, content)
    }

    /// Write a file relative to the lesson directory, creating parents.
    pub fn file(self, rel: &str, content: &str) -> Self {
        let path = self.path.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    /// Create `images/<dir>/` holding placeholder files named `names`.
    pub fn images(self, dir: &str, names: &[&str]) -> Self {
        let image_dir = self.path.join("images").join(dir);
        fs::create_dir_all(&image_dir).unwrap();
        for name in names {
            fs::write(image_dir.join(name), "fake image").unwrap();
        }
        self
    }
}

// =========================================================================
// Catalog lookups — panic with a clear message on miss
// =========================================================================

/// Find the record for an engine. Panics if the catalog has none.
pub fn find_record(catalog: &LessonCatalog, engine: Engine) -> &EngineRecord {
    catalog.engine(engine).unwrap_or_else(|| {
        let names = record_names(catalog);
        panic!("no record for {engine}. Available: {names:?}")
    })
}

/// Engines of all records, in catalog order.
pub fn record_names(catalog: &LessonCatalog) -> Vec<Engine> {
    catalog.engine_records.iter().map(|r| r.name).collect()
}
