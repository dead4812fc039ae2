//! Lesson configuration loaded from `conversion.ini`.
//!
//! The file is produced by the PDF build pipeline and records, per engine,
//! which PDF was generated and how the build went:
//!
//! ```ini
//! [common]
//! ; optional, default "html"
//! mode = html
//! ; optional, default "intro"
//! category = advanced
//!
//! [PDFreactor]
//! pdf = lesson-pdfreactor.pdf
//! status = 0
//! message = Conversion finished
//!
//! [PrinceXML]
//! pdf = lesson-princexml.pdf
//! status = 1
//! message = Prince exited with code 1
//!
//!     error: unsupported @page selector
//! ```
//!
//! ## Rules
//!
//! - A missing file is not an error: it means no PDFs were built yet, and
//!   [`read_config`] returns default settings with no engine sections.
//! - `mode` and `category` default independently of each other.
//! - Sections that are not an [`Engine`] are skipped.
//! - Engine sections must define `pdf`, `status` and `message`. A missing key
//!   fails the whole read: a half-filled record would misreport build status.
//! - Engine sections keep their file order.

use crate::engine::Engine;
use crate::ini::{self, Ini};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// File name of the per-lesson configuration.
pub const CONFIG_FILENAME: &str = "conversion.ini";

/// Section holding lesson-wide settings.
pub const COMMON_SECTION: &str = "common";

const REQUIRED_KEYS: [&str; 3] = ["pdf", "status", "message"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Syntax error: {0}")]
    Syntax(#[from] ini::ParseError),
    #[error("Section [{section}] is missing required key '{key}'")]
    MissingKey { section: Engine, key: &'static str },
}

/// Lesson-wide settings from the `[common]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonSettings {
    pub mode: String,
    pub category: String,
}

impl Default for LessonSettings {
    fn default() -> Self {
        Self {
            mode: "html".to_string(),
            category: "intro".to_string(),
        }
    }
}

/// One engine section, as declared in the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSection {
    pub engine: Engine,
    /// PDF path relative to the lesson directory.
    pub pdf: String,
    pub status: String,
    pub message: String,
}

/// Everything read from a lesson's `conversion.ini`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonConfig {
    pub settings: LessonSettings,
    /// Engine sections in file order.
    pub sections: Vec<EngineSection>,
}

/// Read a lesson config file.
///
/// Returns the default config when `path` does not exist.
pub fn read_config(path: &Path) -> Result<LessonConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LessonConfig::default()),
        Err(e) => return Err(e.into()),
    };
    parse_config(&content)
}

/// Parse config file contents.
pub fn parse_config(content: &str) -> Result<LessonConfig, ConfigError> {
    let ini = Ini::parse(content)?;

    let defaults = LessonSettings::default();
    let setting = |key: &str, default: String| {
        ini.get(COMMON_SECTION, key)
            .map(str::to_string)
            .unwrap_or(default)
    };
    let settings = LessonSettings {
        mode: setting("mode", defaults.mode),
        category: setting("category", defaults.category),
    };

    let mut sections = Vec::new();
    for section in ini.sections() {
        let Some(engine) = Engine::from_section(section.name()) else {
            continue;
        };
        let [pdf, status, message] = REQUIRED_KEYS.map(|key| {
            ini.get(section.name(), key)
                .map(str::to_string)
                .ok_or(ConfigError::MissingKey {
                    section: engine,
                    key,
                })
        });
        sections.push(EngineSection {
            engine,
            pdf: pdf?,
            status: status?,
            message: message?,
        });
    }

    Ok(LessonConfig { settings, sections })
}
