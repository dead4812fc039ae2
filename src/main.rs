use clap::{Parser, Subcommand};
use lesson_catalog::catalog::CatalogBuilder;
use lesson_catalog::root::LessonRoot;
use lesson_catalog::{download, output, render};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lesson-catalog")]
#[command(about = "Catalog generated PDFs and images for lessons")]
#[command(long_about = "\
Catalog generated PDFs and images for lessons

Each lesson is a directory under the lesson root. Its conversion.ini records
which PDF every rendering engine produced and how the build went.

Lesson structure:

  lessons/
  └── typography-101/
      ├── conversion.ini             # Build results (optional)
      ├── README.rst                 # Shown verbatim (optional)
      ├── styles.css                 # Linked from the lesson page (optional)
      ├── typography-pdfreactor.pdf
      └── images/
          └── pdfreactor/            # Lowercased engine name
              ├── page-1.png
              └── thumb-page-1.png   # Thumbnail, not listed

conversion.ini:

  [common]
  # default: html
  mode = html
  # default: intro
  category = intro

  # One section per engine: PDFreactor, PrinceXML, Vivliostyle, Antennahouse
  [PDFreactor]
  pdf = typography-pdfreactor.pdf
  status = 0
  message = Conversion finished

Missing PDFs and image directories are reported on stderr but never fail
a build.")]
#[command(version)]
struct Cli {
    /// Lesson root directory
    #[arg(long, env = "LESSON_ROOT", global = true)]
    lesson_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List lessons under the lesson root
    List,
    /// Build and print a lesson catalog
    Show {
        lesson: String,
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a lesson page as HTML
    Render {
        lesson: String,
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the file a download request resolves to
    Locate {
        lesson: String,
        filename: String,
        /// Image directory (lowercased engine name); omit for PDFs
        #[arg(long)]
        vendor: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let root_path = cli
        .lesson_root
        .ok_or("lesson root not set: pass --lesson-root or set $LESSON_ROOT")?;
    let root = LessonRoot::open(&root_path)?;

    match cli.command {
        Command::List => {
            output::print_lessons(&root.lessons()?);
        }
        Command::Show { lesson, json } => {
            let view = CatalogBuilder::new(root).build(&lesson)?;
            output::print_diagnostics(&view.diagnostics);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                output::print_catalog(&view);
            }
        }
        Command::Render {
            lesson,
            output: out,
        } => {
            let view = CatalogBuilder::new(root).build(&lesson)?;
            output::print_diagnostics(&view.diagnostics);
            match out {
                Some(path) => {
                    render::write_lesson_page(&view, &path)?;
                    eprintln!("Generated {}", path.display());
                }
                None => println!("{}", render::render_lesson(&view).into_string()),
            }
        }
        Command::Locate {
            lesson,
            filename,
            vendor,
        } => {
            let path = match vendor {
                Some(vendor) => download::resolve_image(&root, &lesson, &vendor, &filename)?,
                None => download::resolve_pdf(&root, &lesson, &filename)?,
            };
            println!("{}", path.display());
        }
    }

    Ok(())
}
