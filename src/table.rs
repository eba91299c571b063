//! Ordered CSV table model.
//!
//! Rows and columns keep their input order; writing back a table that
//! was not modified reproduces the input byte-for-byte (fields are only
//! quoted when the CSV dialect requires it, matching what the writer
//! itself produced on the previous run).
//!
//! Output is written through a temp file in the destination directory
//! and renamed over the target, so input path == output path is safe:
//! the source is fully in memory before the replace, and a crash mid-run
//! leaves the original file untouched.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tempfile::NamedTempFile;

/// An in-memory CSV table: one header row plus data rows, order preserving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Load a table from a CSV file. The first row is the header.
    ///
    /// Ragged rows are squared off to the header width: short rows are
    /// padded with empty fields, over-long rows have their extra fields
    /// dropped.
    pub fn load(path: &Path) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("failed to open {}", path.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("failed to read header of {}", path.display()))?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() {
            bail!("{}: empty header row", path.display());
        }

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("{}: bad record at line {}", path.display(), i + 2))?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            // Pad or truncate so every row has one field per column.
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Table { headers, rows })
    }

    /// Index of a named column, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of a named column, as a hard requirement.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column(name)
            .with_context(|| format!("required column '{}' not found in table", name))
    }

    /// Append a column with a default value for every row, unless a
    /// column of that name already exists. Existing columns are never
    /// overwritten. Returns the column index either way.
    pub fn ensure_column(&mut self, name: &str, default: &str) -> usize {
        if let Some(idx) = self.column(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(default.to_string());
        }
        self.headers.len() - 1
    }

    /// Write the table to `path` atomically: serialize to a temp file in
    /// the same directory, then rename over the target.
    pub fn write(&self, path: &Path) -> Result<()> {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let tmp = match dir {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .with_context(|| format!("failed to create temp file near {}", path.display()))?;

        let mut writer = csv::Writer::from_writer(tmp);
        writer
            .write_record(&self.headers)
            .context("failed to write header")?;
        for row in &self.rows {
            writer.write_record(row).context("failed to write row")?;
        }
        let tmp = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .context("failed to flush CSV output")?;
        tmp.persist(path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
