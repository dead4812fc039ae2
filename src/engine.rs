//! The closed set of PDF rendering engines a lesson can be built with.
//!
//! Every engine appears in `conversion.ini` as a section named exactly after
//! it (`[PDFreactor]`, `[PrinceXML]`, ...). Its screenshots live under
//! `images/<name lowercased>/` in the lesson directory.
//!
//! [`Engine::from_section`] is the one place that decides whether a section
//! name is an engine. Anything it does not recognize is skipped by the
//! config reader, so new sections written by a newer build pipeline never
//! break older readers.

use serde::Serialize;
use std::fmt;

/// A supported PDF rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Engine {
    #[serde(rename = "PDFreactor")]
    PdfReactor,
    #[serde(rename = "PrinceXML")]
    PrinceXml,
    #[serde(rename = "Vivliostyle")]
    Vivliostyle,
    #[serde(rename = "Antennahouse")]
    AntennaHouse,
}

impl Engine {
    pub const ALL: [Engine; 4] = [
        Engine::PdfReactor,
        Engine::PrinceXml,
        Engine::Vivliostyle,
        Engine::AntennaHouse,
    ];

    /// Look up the engine for a config section name.
    ///
    /// Matching is exact and case-sensitive. Returns `None` for any section
    /// that is not an engine (including `common`).
    pub fn from_section(name: &str) -> Option<Engine> {
        Self::ALL.into_iter().find(|e| e.section_name() == name)
    }

    /// The section name used in `conversion.ini`.
    pub fn section_name(self) -> &'static str {
        match self {
            Engine::PdfReactor => "PDFreactor",
            Engine::PrinceXml => "PrinceXML",
            Engine::Vivliostyle => "Vivliostyle",
            Engine::AntennaHouse => "Antennahouse",
        }
    }

    /// Directory name under `images/` holding this engine's screenshots.
    pub fn image_dir_name(self) -> &'static str {
        match self {
            Engine::PdfReactor => "pdfreactor",
            Engine::PrinceXml => "princexml",
            Engine::Vivliostyle => "vivliostyle",
            Engine::AntennaHouse => "antennahouse",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_name())
    }
}
