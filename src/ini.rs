//! Minimal INI reader for `conversion.ini` files.
//!
//! The files are written by the external PDF build pipeline with a stock
//! section/key=value writer, so this reader accepts that dialect and rejects
//! anything ambiguous instead of guessing:
//!
//! ```text
//! # comment            ; comment
//! [common]
//! mode = html
//! category: advanced
//!
//! [PDFreactor]
//! pdf = lesson-pdfreactor.pdf
//! status = 0
//! message = first line
//!     continued on an indented line
//! ```
//!
//! - Section names are case-sensitive; option names are lowercased.
//! - `=` and `:` both separate a key from its value (first one wins).
//! - Indented lines after an option continue its value. Blank lines inside
//!   a continuation are kept; trailing blank lines are dropped.
//! - `[DEFAULT]` holds fallback options visible from every section.
//! - Duplicate sections, duplicate keys, and options outside a section are
//!   errors.
//!
//! Values are returned raw: there is no `%(name)s` interpolation.

use thiserror::Error;

/// Name of the section whose options act as fallbacks for all others.
pub const DEFAULT_SECTION: &str = "DEFAULT";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: option found before any [section] header")]
    MissingSectionHeader { line: usize },
    #[error("line {line}: section [{name}] already defined")]
    DuplicateSection { line: usize, name: String },
    #[error("line {line}: option '{key}' already defined in section [{section}]")]
    DuplicateOption {
        line: usize,
        section: String,
        key: String,
    },
    #[error("line {line}: option name is empty")]
    EmptyKey { line: usize },
    #[error("line {line}: expected `key = value`, found '{text}'")]
    Malformed { line: usize, text: String },
}

/// A named section and its options in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    options: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    defaults: Section,
    sections: Vec<Section>,
}

/// Where options are currently being written.
#[derive(Clone, Copy)]
enum Target {
    Defaults,
    Section(usize),
}

/// The option the next indented line would continue.
struct OpenOption {
    target: Target,
    index: usize,
    indent: usize,
    /// Blank lines seen since the last line of the value.
    pending_blank: usize,
}

impl Ini {
    pub fn parse(content: &str) -> Result<Ini, ParseError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut ini = Ini {
            defaults: Section::new(DEFAULT_SECTION),
            sections: Vec::new(),
        };
        let mut target: Option<Target> = None;
        let mut open: Option<OpenOption> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let text = raw.trim();

            if text.is_empty() {
                if let Some(cont) = &mut open {
                    cont.pending_blank += 1;
                }
                continue;
            }
            if text.starts_with('#') || text.starts_with(';') {
                continue;
            }

            let indent = raw.len() - raw.trim_start().len();
            if let Some(cont) = &mut open
                && indent > cont.indent
            {
                let value = &mut ini.section_mut(cont.target).options[cont.index].1;
                for _ in 0..=cont.pending_blank {
                    value.push('\n');
                }
                value.push_str(text);
                cont.pending_blank = 0;
                continue;
            }
            open = None;

            if let Some(name) = parse_header(text) {
                if name == DEFAULT_SECTION {
                    target = Some(Target::Defaults);
                } else if ini.section(name).is_some() {
                    return Err(ParseError::DuplicateSection {
                        line,
                        name: name.to_string(),
                    });
                } else {
                    ini.sections.push(Section::new(name));
                    target = Some(Target::Section(ini.sections.len() - 1));
                }
                continue;
            }

            let Some(sep) = text.find(['=', ':']) else {
                return Err(ParseError::Malformed {
                    line,
                    text: text.to_string(),
                });
            };
            let Some(current) = target else {
                return Err(ParseError::MissingSectionHeader { line });
            };

            let key = text[..sep].trim().to_lowercase();
            let value = text[sep + 1..].trim().to_string();
            if key.is_empty() {
                return Err(ParseError::EmptyKey { line });
            }

            let section = ini.section_mut(current);
            if section.get(&key).is_some() {
                return Err(ParseError::DuplicateOption {
                    line,
                    section: section.name.clone(),
                    key,
                });
            }
            section.options.push((key, value));
            open = Some(OpenOption {
                target: current,
                index: section.options.len() - 1,
                indent,
                pending_blank: 0,
            });
        }

        Ok(ini)
    }

    /// Sections in file order, excluding `[DEFAULT]`.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Look up `key` in `section`, falling back to `[DEFAULT]`.
    ///
    /// Returns `None` when the section does not exist, even if `[DEFAULT]`
    /// defines the key. Key lookup is case-insensitive.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let section = self.section(section)?;
        let key = key.to_lowercase();
        section.get(&key).or_else(|| self.defaults.get(&key))
    }

    fn section_mut(&mut self, target: Target) -> &mut Section {
        match target {
            Target::Defaults => &mut self.defaults,
            Target::Section(i) => &mut self.sections[i],
        }
    }
}

/// `[name]` → `Some("name")`. Text after the last `]` is ignored.
fn parse_header(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('[')?;
    let end = rest.rfind(']')?;
    let name = &rest[..end];
    if name.is_empty() { None } else { Some(name) }
}
