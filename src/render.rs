//! Standalone HTML page for a lesson.
//!
//! Renders a [`LessonView`] the way the lesson server shows it: README on
//! top, then one block per engine with its build status, a PDF download link
//! and a thumbnail gallery. Links point at the download routes described in
//! [`crate::download`]:
//!
//! ```text
//! /lesson/<lesson>/download/<pdf_file>
//! /lesson/<lesson>/download/images/<engine dir>/<image>
//! /lesson/<lesson>/download/images/<engine dir>/thumb-<image>
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/), so all interpolated values
//! (config messages, README text) are escaped. Lesson and file names are
//! percent-encoded per path segment before they go into a link.

use crate::catalog::{
    EngineRecord, IMAGES_DIR, LessonCatalog, LessonView, STYLESHEET_FILENAME, THUMBNAIL_PREFIX,
};
use crate::root::relative_segments;
use maud::{DOCTYPE, Markup, html};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Characters that cannot appear raw inside one URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const CSS: &str = r#"
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
.readme { white-space: pre-wrap; background: #f6f6f6; padding: 1rem; }
.engine { border-top: 1px solid #ddd; padding: 1rem 0; }
.gallery { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.gallery img { max-width: 10rem; }
"#;

/// Render the full lesson page.
pub fn render_lesson(view: &LessonView) -> Markup {
    let catalog = &view.catalog;
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Lesson " (catalog.name) }
                style { (CSS) }
                @if catalog.has_css {
                    link rel="stylesheet" href=(download_url(catalog, &[STYLESHEET_FILENAME]));
                }
            }
            body class={ "mode-" (catalog.mode) } {
                header {
                    h1 { (catalog.name) }
                    p.lesson-meta {
                        span.category { (catalog.category) }
                        " · "
                        span.mode { (catalog.mode) }
                    }
                }
                main {
                    @if let Some(readme) = &view.readme {
                        pre.readme { (readme) }
                    }
                    @if catalog.engine_records.is_empty() {
                        p.no-pdfs { "No PDFs have been generated for this lesson yet." }
                    }
                    @for record in &catalog.engine_records {
                        (render_engine(catalog, record))
                    }
                }
            }
        }
    }
}

/// Render one engine block.
fn render_engine(catalog: &LessonCatalog, record: &EngineRecord) -> Markup {
    let image_dir = record.name.image_dir_name();
    html! {
        section.engine id=(image_dir) {
            h2 { (record.name.section_name()) }
            dl {
                dt { "Status" }
                dd.status { (record.status) }
                dt { "Message" }
                dd.message { (record.message) }
            }
            @if let Some(segments) = relative_segments(&record.pdf_file) {
                a.pdf href=(download_url(catalog, &segments)) download { (record.pdf_file) }
            } @else {
                span.pdf { (record.pdf_file) }
            }
            @if !record.images.is_empty() {
                div.gallery {
                    @for image in &record.images {
                        a href=(image_url(catalog, image_dir, image)) {
                            img src=(image_url(catalog, image_dir, &format!("{THUMBNAIL_PREFIX}{image}")))
                                alt=(image) loading="lazy";
                        }
                    }
                }
            }
        }
    }
}

fn download_url(catalog: &LessonCatalog, segments: &[&str]) -> String {
    let mut url = format!("/lesson/{}/download", encode(&catalog.name));
    for segment in segments {
        url.push('/');
        url.push_str(&encode(segment));
    }
    url
}

fn image_url(catalog: &LessonCatalog, image_dir: &str, filename: &str) -> String {
    download_url(catalog, &[IMAGES_DIR, image_dir, filename])
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Render the lesson page and write it to `path`.
pub fn write_lesson_page(view: &LessonView, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_lesson(view).into_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use tempfile::TempDir;

    fn record(engine: Engine, images: &[&str]) -> EngineRecord {
        EngineRecord {
            name: engine,
            pdf_file: format!("out-{}.pdf", engine.image_dir_name()),
            status: "0".to_string(),
            message: "Conversion finished".to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn view(records: Vec<EngineRecord>) -> LessonView {
        LessonView {
            catalog: LessonCatalog {
                name: "intro".to_string(),
                engine_records: records,
                has_css: false,
                mode: "html".to_string(),
                category: "intro".to_string(),
            },
            readme: None,
            diagnostics: vec![],
        }
    }

    #[test]
    fn page_includes_doctype_and_title() {
        let html = render_lesson(&view(vec![])).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Lesson intro</title>"));
    }

    #[test]
    fn page_without_records_says_so() {
        let html = render_lesson(&view(vec![])).into_string();
        assert!(html.contains("No PDFs have been generated"));
    }

    #[test]
    fn engine_blocks_follow_record_order() {
        let html = render_lesson(&view(vec![
            record(Engine::Vivliostyle, &[]),
            record(Engine::PdfReactor, &[]),
        ]))
        .into_string();
        let viv = html.find("<h2>Vivliostyle</h2>").unwrap();
        let reactor = html.find("<h2>PDFreactor</h2>").unwrap();
        assert!(viv < reactor);
    }

    #[test]
    fn pdf_link_uses_download_route() {
        let html = render_lesson(&view(vec![record(Engine::PrinceXml, &[])])).into_string();
        assert!(html.contains(r#"href="/lesson/intro/download/out-princexml.pdf""#));
    }

    #[test]
    fn gallery_links_full_image_and_thumbnail() {
        let html =
            render_lesson(&view(vec![record(Engine::PdfReactor, &["page-1.png"])])).into_string();
        assert!(html.contains(r#"href="/lesson/intro/download/images/pdfreactor/page-1.png""#));
        assert!(
            html.contains(r#"src="/lesson/intro/download/images/pdfreactor/thumb-page-1.png""#)
        );
    }

    #[test]
    fn pdf_in_subdirectory_links_each_segment() {
        let mut r = record(Engine::PrinceXml, &[]);
        r.pdf_file = "build/out.pdf".to_string();
        let html = render_lesson(&view(vec![r])).into_string();
        assert!(html.contains(r#"href="/lesson/intro/download/build/out.pdf""#));
    }

    #[test]
    fn pdf_outside_lesson_is_not_linked() {
        let mut r = record(Engine::PrinceXml, &[]);
        r.pdf_file = "../other/out.pdf".to_string();
        let html = render_lesson(&view(vec![r])).into_string();
        assert!(!html.contains("download/../"));
        assert!(html.contains(r#"<span class="pdf">../other/out.pdf</span>"#));
    }

    #[test]
    fn link_segments_are_percent_encoded() {
        let mut v = view(vec![record(Engine::PdfReactor, &["fig #1.png", "a?b.png"])]);
        v.catalog.name = "intro 2".to_string();
        let html = render_lesson(&v).into_string();
        let base = "/lesson/intro%202/download/images/pdfreactor";
        assert!(html.contains(&format!(r#"href="{base}/fig%20%231.png""#)));
        assert!(html.contains(&format!(r#"src="{base}/thumb-fig%20%231.png""#)));
        assert!(html.contains(&format!(r#"href="{base}/a%3Fb.png""#)));
    }

    #[test]
    fn no_gallery_without_images() {
        let html = render_lesson(&view(vec![record(Engine::PdfReactor, &[])])).into_string();
        assert!(!html.contains("gallery\""));
    }

    #[test]
    fn stylesheet_linked_only_when_present() {
        let mut v = view(vec![]);
        assert!(!render_lesson(&v).into_string().contains("styles.css"));

        v.catalog.has_css = true;
        let html = render_lesson(&v).into_string();
        assert!(html.contains(r#"href="/lesson/intro/download/styles.css""#));
    }

    #[test]
    fn readme_is_escaped() {
        let mut v = view(vec![]);
        v.readme = Some("Use <b>bold</b> & more".to_string());
        let html = render_lesson(&v).into_string();
        assert!(html.contains("Use &lt;b&gt;bold&lt;/b&gt; &amp; more"));
    }

    #[test]
    fn config_message_is_escaped() {
        let mut r = record(Engine::PdfReactor, &[]);
        r.message = "<script>alert(1)</script>".to_string();
        let html = render_lesson(&view(vec![r])).into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn body_class_reflects_mode() {
        let html = render_lesson(&view(vec![])).into_string();
        assert!(html.contains(r#"<body class="mode-html">"#));
    }

    #[test]
    fn write_lesson_page_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/intro/index.html");
        write_lesson_page(&view(vec![]), &path).unwrap();
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("<h1>intro</h1>"));
    }
}
