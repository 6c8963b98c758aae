// src/main.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use syllabus_extractor::catalog::SYLLABUS_CATALOG;
use syllabus_extractor::compare::{compare_sections, render_report, ComparisonTable};
use syllabus_extractor::document::load_document;
use syllabus_extractor::export::{build_rows, ExportTable};
use syllabus_extractor::session::Session;
use syllabus_extractor::storage::StorageManager;
use syllabus_extractor::utils::{self, AppError};

/// Command Line Interface for the syllabus section extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log this crate at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract sections from one or more syllabi into a tabular export
    Extract {
        /// Syllabus files (.txt, .pdf, .docx)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        sections: SectionArgs,

        /// Free-form text to attach to one document's row
        #[arg(long)]
        selected_text: Option<String>,

        /// File the selected text belongs to (defaults to the first file)
        #[arg(long, requires = "selected_text")]
        selected_from: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,

        /// Debug mode - save raw and heading-annotated text for each document
        #[arg(short, long)]
        debug: bool,
    },

    /// Compare sections between an original and a new syllabus
    Compare {
        original: PathBuf,
        new: PathBuf,

        #[command(flatten)]
        sections: SectionArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Skip writing the plain-text report
        #[arg(long)]
        no_report: bool,
    },

    /// List the known sections and the headings that identify them
    Sections,
}

#[derive(Args, Debug)]
struct SectionArgs {
    /// Section to extract; repeat for several (case-insensitive)
    #[arg(short, long = "section")]
    sections: Vec<String>,

    /// Use every known section
    #[arg(long, conflicts_with = "sections")]
    all_sections: bool,
}

impl SectionArgs {
    fn resolve(&self) -> Vec<String> {
        if self.all_sections {
            return SYLLABUS_CATALOG.names().map(str::to_string).collect();
        }
        let mut resolved: Vec<String> = Vec::new();
        for name in &self.sections {
            let canonical = SYLLABUS_CATALOG.canonical_name(name).to_string();
            if SYLLABUS_CATALOG.lookup(&canonical).is_none() {
                tracing::warn!("'{}' is not a known section; searching for it literally", canonical);
            }
            if !resolved.contains(&canonical) {
                resolved.push(canonical);
            }
        }
        resolved
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output directory for exports and reports
    #[arg(short, long, env = "SYLLABUS_OUTPUT_DIR", default_value = "./output")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let cli = Cli::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(cli.verbose);
    tracing::debug!("Parsed args: {:?}", cli);

    match cli.command {
        Command::Extract { files, sections, selected_text, selected_from, output, debug } => {
            run_extract(files, sections.resolve(), selected_text, selected_from, output.output_dir, debug).await
        }
        Command::Compare { original, new, sections, output, no_report } => {
            run_compare(original, new, sections.resolve(), output.output_dir, no_report).await
        }
        Command::Sections => {
            for spec in SYLLABUS_CATALOG.sections() {
                println!("{:<24} {}", spec.name, spec.aliases.join(", "));
            }
            Ok(())
        }
    }
}

async fn run_extract(
    files: Vec<PathBuf>,
    sections: Vec<String>,
    selected_text: Option<String>,
    selected_from: Option<PathBuf>,
    output_dir: PathBuf,
    debug: bool,
) -> Result<(), AppError> {
    if sections.is_empty() && selected_text.is_none() {
        return Err(AppError::Config(
            "Select text or choose at least one section to export".to_string(),
        ));
    }

    let storage = StorageManager::new(&output_dir)?;
    let mut session = Session::new();
    let mut failure_count = 0;

    for path in &files {
        tracing::info!("Loading {}", path.display());
        match load_document(path).await {
            Ok(document) => {
                tracing::info!("Decoded {} ({} bytes of text)", document.name, document.text.len());
                if debug {
                    let stem = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| document.name.clone());
                    let debug_dir = output_dir.join("debug");
                    if let Err(e) = utils::text_debug::create_debug_dump(&document.text, &debug_dir, &stem, &SYLLABUS_CATALOG) {
                        tracing::warn!("Failed to write debug text for {}: {}", document.name, e);
                    }
                }
                if !session.load(document) {
                    tracing::warn!("{} was given more than once; using the first copy", path.display());
                }
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", path.display(), e);
                failure_count += 1;
            }
        }
    }

    if session.documents().is_empty() {
        return Err(AppError::Processing(format!(
            "None of the {} file(s) could be loaded",
            files.len()
        )));
    }

    if let Some(text) = selected_text {
        let owner = selected_from.as_ref().or(files.first()).map(|p| p.to_string_lossy().into_owned());
        if owner.is_some_and(|id| session.select(&id)) {
            session.set_selected_text(text);
        } else {
            tracing::warn!("Selected text ignored: its document was not loaded");
        }
    }

    let rows = build_rows(session.documents(), &sections, session.selection().as_ref());
    let missing: usize = rows
        .iter()
        .map(|r| r.sections.iter().filter(|f| f.body.is_none()).count())
        .sum();
    tracing::info!(
        "Extracted {} section(s) from {} document(s); {} not found",
        sections.len(),
        rows.len(),
        missing
    );

    let table = ExportTable::from_rows(&rows, chrono::Local::now().naive_local());
    let path = storage.save_export(&table)?;
    println!("{}", path.display());

    tracing::info!("Processing finished. Loaded: {}, Failures: {}", rows.len(), failure_count);
    Ok(())
}

async fn run_compare(
    original: PathBuf,
    new: PathBuf,
    sections: Vec<String>,
    output_dir: PathBuf,
    no_report: bool,
) -> Result<(), AppError> {
    if original == new {
        return Err(AppError::Config("Select two different syllabi to compare".to_string()));
    }
    if sections.is_empty() {
        return Err(AppError::Config("Choose at least one section to compare".to_string()));
    }

    let original_doc = load_document(&original).await?;
    let new_doc = load_document(&new).await?;
    tracing::info!("Comparing {} against {}", original_doc.name, new_doc.name);

    let record = compare_sections(&original_doc.text, &new_doc.text, &sections);
    let changed: Vec<&str> = record
        .sections
        .iter()
        .filter(|s| s.changed)
        .map(|s| s.section.as_str())
        .collect();
    tracing::info!("{} of {} section(s) changed: {:?}", changed.len(), record.sections.len(), changed);

    let storage = StorageManager::new(&output_dir)?;
    let table = ComparisonTable::from_record(&record, chrono::Local::now().naive_local());
    println!("{}", storage.save_comparison(&record, &table)?.display());

    let report = render_report(&record);
    if !no_report {
        println!("{}", storage.save_report(&report)?.display());
    }
    print!("{}", report);

    Ok(())
}
