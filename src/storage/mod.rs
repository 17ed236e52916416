// src/storage/mod.rs
use crate::batch::BatchReport;
use crate::models::{CellValue, SheetRow};
use crate::utils::error::StorageError;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fs;
use std::path::{Path, PathBuf};

pub const SHEET_COMPANIES: &str = "Imprese";
pub const SHEET_SHAREHOLDERS: &str = "Soci";
pub const SHEET_OFFICERS: &str = "Amministratori";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes the three record collections as sheets of one workbook.
    pub fn save_workbook(&self, report: &BatchReport, file_name: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(file_name);

        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        write_sheet(&mut workbook, SHEET_COMPANIES, &report.companies, &header)?;
        write_sheet(&mut workbook, SHEET_SHAREHOLDERS, &report.shareholders, &header)?;
        write_sheet(&mut workbook, SHEET_OFFICERS, &report.officers, &header)?;

        workbook.save(&file_path)?;

        tracing::info!(
            "Saved workbook to {} ({} imprese, {} soci, {} amministratori)",
            file_path.display(),
            report.companies.len(),
            report.shareholders.len(),
            report.officers.len()
        );

        Ok(file_path)
    }

    /// Saves the same records as JSON next to the workbook.
    pub fn save_json(&self, report: &BatchReport, file_name: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(file_name).with_extension("json");

        let export = serde_json::json!({
            "imprese": report.companies,
            "soci": report.shareholders,
            "amministratori": report.officers,
            "errori": report.failures,
            "documenti_totali": report.total,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let export_str = serde_json::to_string_pretty(&export)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, export_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved JSON export to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves the raw text of a document and its rule report under `debug/`.
    pub fn save_debug_text(&self, file_origine: &str, text: &str, report: &str) -> Result<PathBuf, StorageError> {
        let debug_dir = self.base_dir.join("debug");
        if !debug_dir.exists() {
            fs::create_dir_all(&debug_dir).map_err(StorageError::IoError)?;
        }

        let stem = Path::new(file_origine)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_origine.to_string());

        fs::write(debug_dir.join(format!("{}.txt", stem)), text).map_err(StorageError::IoError)?;

        let report_path = debug_dir.join(format!("{}_rules.txt", stem));
        fs::write(&report_path, report).map_err(StorageError::IoError)?;

        Ok(report_path)
    }
}

fn write_sheet<R: SheetRow>(
    workbook: &mut Workbook,
    name: &str,
    rows: &[R],
    header: &Format,
) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;

    for (col, title) in R::headers().into_iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, title, header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let row_num = i as u32 + 1;
        for (col, cell) in row.cells().into_iter().enumerate() {
            match cell {
                // Unmatched fields stay blank cells
                CellValue::Text("") => {}
                CellValue::Text(value) => {
                    sheet.write_string(row_num, col as u16, value)?;
                }
                CellValue::Number(value) => {
                    sheet.write_number(row_num, col as u16, value)?;
                }
            }
        }
    }

    sheet.autofit();
    Ok(())
}
