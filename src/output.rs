//! CLI output formatting.
//!
//! # Catalog Display
//!
//! Every engine record follows the same two-level pattern: a header line with
//! its position in the config and its image count, then indented context
//! lines for the PDF, status, message, and images.
//!
//! ```text
//! Lesson typography-101
//!     Mode: html
//!     Category: intro
//!     Stylesheet: styles.css
//!     README: README.rst
//!
//! Engines
//! 001 PDFreactor (2 images)
//!     PDF: typography-pdfreactor.pdf
//!     Status: 0
//!     Message: Conversion finished
//!     001 page-1.png
//!     002 page-2.png
//! 002 PrinceXML (no images)
//!     PDF: typography-princexml.pdf
//!     Status: 1
//!     Message: prince exited with status 1...
//! ```
//!
//! # Diagnostics
//!
//! Diagnostics are printed to stderr with a `-->` marker so they stay out of
//! stdout when it is piped (e.g. `show --json`):
//!
//! ```text
//! --> PrinceXML: no PDF file /lessons/typography-101/typography-princexml.pdf
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O, so they can be
//! tested directly. `print_*` wrappers write the lines out.

use crate::catalog::{Diagnostic, EngineRecord, LessonView};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an engine header: positional index, engine, image count.
///
/// ```text
/// 001 PDFreactor (2 images)
/// 002 PrinceXML (no images)
/// ```
fn engine_header(index: usize, record: &EngineRecord) -> String {
    let count = match record.images.len() {
        0 => "no images".to_string(),
        1 => "1 image".to_string(),
        n => format!("{} images", n),
    };
    format!("{} {} ({})", format_index(index), record.name, count)
}

/// First line of a possibly multi-line value, with `...` if lines were dropped.
fn first_line(text: &str) -> String {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or("");
    if lines.next().is_some() {
        format!("{}...", first)
    } else {
        first.to_string()
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Format a built lesson for display.
pub fn format_catalog(view: &LessonView) -> Vec<String> {
    let catalog = &view.catalog;
    let mut lines = Vec::new();

    lines.push(format!("Lesson {}", catalog.name));
    lines.push(format!("{}Mode: {}", indent(1), catalog.mode));
    lines.push(format!("{}Category: {}", indent(1), catalog.category));
    if catalog.has_css {
        lines.push(format!(
            "{}Stylesheet: {}",
            indent(1),
            crate::catalog::STYLESHEET_FILENAME
        ));
    }
    if view.readme.is_some() {
        lines.push(format!(
            "{}README: {}",
            indent(1),
            crate::catalog::README_FILENAME
        ));
    }

    lines.push(String::new());
    if catalog.engine_records.is_empty() {
        lines.push("No PDFs built".to_string());
        return lines;
    }

    lines.push("Engines".to_string());
    for (i, record) in catalog.engine_records.iter().enumerate() {
        lines.push(engine_header(i + 1, record));
        lines.push(format!("{}PDF: {}", indent(1), record.pdf_file));
        lines.push(format!("{}Status: {}", indent(1), record.status));
        lines.push(format!("{}Message: {}", indent(1), first_line(&record.message)));
        for (j, image) in record.images.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(j + 1), image));
        }
    }

    lines
}

/// Print a built lesson to stdout.
pub fn print_catalog(view: &LessonView) {
    for line in format_catalog(view) {
        println!("{}", line);
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Format diagnostics, one line each.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| format!("--> {}", d)).collect()
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for line in format_diagnostics(diagnostics) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// Lesson listing
// ============================================================================

/// Format the lesson listing.
pub fn format_lessons(lessons: &[String]) -> Vec<String> {
    if lessons.is_empty() {
        return vec!["No lessons found".to_string()];
    }
    lessons
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{} {}", format_index(i + 1), name))
        .collect()
}

/// Print the lesson listing to stdout.
pub fn print_lessons(lessons: &[String]) {
    for line in format_lessons(lessons) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
