// src/export.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::listing::{COLUMNS, ProductRecord};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Make a category name or keyword safe to use as a file stem.
pub fn sanitize_stem(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_matches('.').trim();
    if cleaned.is_empty() {
        "export".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `<dir>/<stem>_<YYYY-MM-DD>.csv`
pub fn export_path(dir: &Path, stem: &str, run_date: NaiveDate) -> PathBuf {
    dir.join(format!("{}_{}.csv", sanitize_stem(stem), run_date.format("%Y-%m-%d")))
}

pub fn write_csv(path: &Path, records: &[ProductRecord]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.write_record(&record.to_csv_record())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write one row per record under `dir`, creating it if needed. Returns the file written.
pub fn export(
    dir: &Path,
    stem: &str,
    run_date: NaiveDate,
    records: &[ProductRecord],
) -> Result<PathBuf, ExportError> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)?;
    }
    let path = export_path(dir, stem, run_date);
    write_csv(&path, records)?;
    Ok(path)
}
