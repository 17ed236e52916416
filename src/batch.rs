// src/batch.rs
use crate::extractors::{extract_visura, ExtractedVisura};
use crate::models::{CompanyRecord, OfficerRecord, ShareholderRecord};
use crate::pdf::TextSource;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Spreadsheet name used when none is given.
pub const DEFAULT_OUTPUT_NAME: &str = "database_visure.xlsx";

/// What to do with the rest of the batch once a document fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first failure and write nothing.
    #[default]
    Abort,
    /// Record the failure and move on; the output holds the documents that worked.
    Continue,
}

/// Everything one run needs, independent of how it was collected.
#[derive(Debug, Clone)]
pub struct Session {
    pub pdf_files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub output_name: String,
    pub error_policy: ErrorPolicy,
    pub write_json: bool,
    pub debug: bool,
}

impl Session {
    pub fn new(pdf_files: Vec<PathBuf>) -> Self {
        Self {
            pdf_files,
            output_dir: default_output_dir(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            error_policy: ErrorPolicy::default(),
            write_json: false,
            debug: false,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_name)
    }
}

/// The user's home directory, or the current directory when it is unknown.
pub fn default_output_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Why a single document could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentError {
    pub file: String,
    pub reason: String,
}

pub type DocumentOutcome = Result<ExtractedVisura, DocumentError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { total: usize },
    DocumentStarted { index: usize, total: usize, file: String },
    DocumentFinished { completed: usize, total: usize, ok: bool },
    Finished { completed: usize, total: usize },
}

impl ProgressEvent {
    /// Completed fraction as a whole percentage.
    pub fn percent(&self) -> u8 {
        let (completed, total) = match self {
            ProgressEvent::Started { .. } | ProgressEvent::DocumentStarted { .. } => return 0,
            ProgressEvent::DocumentFinished { completed, total, .. }
            | ProgressEvent::Finished { completed, total } => (*completed, *total),
        };
        if total == 0 {
            return 100;
        }
        (completed.min(total) * 100 / total) as u8
    }
}

/// Receives progress events from [`run_batch`].
pub trait ProgressSink {
    fn on_event(&self, event: &ProgressEvent);
}

/// Ignores every event.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_event(&self, _event: &ProgressEvent) {}
}

/// Accumulated output of one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub companies: Vec<CompanyRecord>,
    pub shareholders: Vec<ShareholderRecord>,
    pub officers: Vec<OfficerRecord>,
    pub failures: Vec<DocumentError>,
    /// Set when a failure stopped the batch early.
    pub aborted: bool,
    pub total: usize,
}

impl BatchReport {
    /// Appends one extracted document under the next company id.
    fn push(&mut self, file_origine: String, visura: ExtractedVisura) -> u32 {
        let id_impresa = self.companies.len() as u32 + 1;

        self.shareholders.extend(
            visura
                .shareholders
                .into_iter()
                .map(|shareholder| ShareholderRecord { shareholder, id_impresa }),
        );
        self.officers.extend(
            visura
                .officers
                .into_iter()
                .map(|officer| OfficerRecord { officer, id_impresa }),
        );
        self.companies.push(CompanyRecord {
            fields: visura.company,
            id_impresa,
            file_origine,
        });

        id_impresa
    }

    pub fn processed(&self) -> usize {
        self.companies.len() + self.failures.len()
    }
}

/// Last path component, as shown in the `file_origine` column.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads and extracts one document.
pub fn process_document<S: TextSource + ?Sized>(path: &Path, source: &S) -> DocumentOutcome {
    let text = source.document_text(path).map_err(|e| DocumentError {
        file: file_name(path),
        reason: e.to_string(),
    })?;
    Ok(extract_visura(&text))
}

/// Processes `session.pdf_files` one after the other, in the given order.
pub fn run_batch<S: TextSource + ?Sized>(
    session: &Session,
    source: &S,
    progress: &dyn ProgressSink,
) -> BatchReport {
    let total = session.pdf_files.len();
    let mut report = BatchReport {
        total,
        ..Default::default()
    };

    tracing::info!("Inizio elaborazione… ({} documenti)", total);
    progress.on_event(&ProgressEvent::Started { total });

    for (index, path) in session.pdf_files.iter().enumerate() {
        let file = file_name(path);
        tracing::info!("Leggo: {}", file);
        progress.on_event(&ProgressEvent::DocumentStarted {
            index,
            total,
            file: file.clone(),
        });

        let outcome = process_document(path, source);
        let ok = outcome.is_ok();

        match outcome {
            Ok(visura) => {
                let id = report.push(file, visura);
                tracing::info!("OK (id_impresa {})", id);
            }
            Err(failure) => {
                tracing::error!("ERRORE: {}: {}", failure.file, failure.reason);
                report.failures.push(failure);
            }
        }

        progress.on_event(&ProgressEvent::DocumentFinished {
            completed: index + 1,
            total,
            ok,
        });

        if !ok && session.error_policy == ErrorPolicy::Abort {
            report.aborted = true;
            tracing::warn!("Batch aborted, {} document(s) not processed", total - index - 1);
            break;
        }
    }

    progress.on_event(&ProgressEvent::Finished {
        completed: report.processed(),
        total,
    });

    report
}
