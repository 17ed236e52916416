// src/main.rs
mod batch;
mod extractors;
mod models;
mod pdf;
mod progress;
mod storage;
mod utils;

use batch::{ErrorPolicy, Session};
use clap::Parser;
use indicatif::MultiProgress;
use extractors::FIELD_RULES;
use pdf::PdfTextSource;
use progress::IndicatifProgress;
use std::path::PathBuf;
use storage::StorageManager;
use utils::text_debug::DebugTextSource;
use utils::AppError;

/// Estrazione Visure Camerali → Excel
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Visura PDF files, processed in the given order
    #[arg(required = true)]
    pdf_files: Vec<PathBuf>,

    /// Output directory (defaults to the home directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Name of the generated workbook
    #[arg(short = 'n', long, default_value = batch::DEFAULT_OUTPUT_NAME)]
    output_name: String,

    /// Keep processing after a document fails and write what was extracted
    #[arg(long)]
    keep_going: bool,

    /// Also write the records as JSON next to the workbook
    #[arg(long)]
    json: bool,

    /// Debug mode - save extracted text and per-rule matches for each PDF
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn into_session(self) -> Result<Session, AppError> {
        if let Some(bad) = self.pdf_files.iter().find(|p| !is_pdf(p)) {
            return Err(AppError::Config(format!("Not a PDF file: {}", bad.display())));
        }

        let mut session = Session::new(self.pdf_files);
        if let Some(dir) = self.output_dir {
            session.output_dir = dir;
        }
        session.output_name = self.output_name;
        session.error_policy = if self.keep_going {
            ErrorPolicy::Continue
        } else {
            ErrorPolicy::Abort
        };
        session.write_json = self.json;
        session.debug = self.debug;
        Ok(session)
    }
}

fn is_pdf(path: &std::path::Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var), sharing the terminal with the progress bar
    let multi = MultiProgress::new();
    utils::logging::setup_logging(args.debug, &multi);
    tracing::debug!("Starting processing for args: {:?}", args);

    let session = args.into_session()?;
    tracing::info!("{} PDF selezionati.", session.pdf_files.len());
    tracing::info!("File di output: {}", session.output_path().display());

    // 3. Initialize storage
    let storage = StorageManager::new(&session.output_dir)?;

    // 4. Process every document
    let progress = IndicatifProgress::new(&multi);
    let report = if session.debug {
        tracing::info!("Debug files in {}", storage.base_dir().join("debug").display());
        let source = DebugTextSource::new(PdfTextSource::new(), &storage, &FIELD_RULES);
        batch::run_batch(&session, &source, &progress)
    } else {
        batch::run_batch(&session, &PdfTextSource::new(), &progress)
    };

    tracing::info!(
        "Processing finished. Success: {}, Failures: {}, Total: {}",
        report.companies.len(),
        report.failures.len(),
        report.total
    );

    if report.aborted {
        let reason = report
            .failures
            .last()
            .map(|f| format!("{}: {}", f.file, f.reason))
            .unwrap_or_default();
        return Err(AppError::Processing(format!("Batch aborted, no workbook written ({})", reason)));
    }

    if report.companies.is_empty() && !report.failures.is_empty() {
        return Err(AppError::Processing(format!(
            "Failed to extract any visura from {} documents",
            report.failures.len()
        )));
    }

    // 5. Export
    let path = storage.save_workbook(&report, &session.output_name)?;
    if session.write_json {
        storage.save_json(&report, &session.output_name)?;
    }

    for failure in &report.failures {
        tracing::warn!("Skipped {}: {}", failure.file, failure.reason);
    }
    tracing::info!("COMPLETATO. File creato: {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_into_session() {
        let args = Args::parse_from(["visure_extractor", "-o", "/tmp/out", "--keep-going", "a.pdf", "b.PDF"]);
        let session = args.into_session().unwrap();

        assert_eq!(session.pdf_files, vec![PathBuf::from("a.pdf"), PathBuf::from("b.PDF")]);
        assert_eq!(session.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(session.output_name, "database_visure.xlsx");
        assert_eq!(session.error_policy, ErrorPolicy::Continue);
    }

    #[test]
    fn test_non_pdf_input_is_rejected() {
        let args = Args::parse_from(["visure_extractor", "a.pdf", "notes.txt"]);
        assert!(matches!(args.into_session(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_at_least_one_file_required() {
        assert!(Args::try_parse_from(["visure_extractor"]).is_err());
    }
}
