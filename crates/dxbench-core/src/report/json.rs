use crate::model::ResultRecord;
use crate::report::RunSummary;
use anyhow::Context;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Replace `path` with the pretty JSON of `value` via a sibling temp file,
/// so a crash mid-write never leaves a truncated file behind.
pub fn write_json_atomic<T: Serialize + ?Sized>(value: &T, path: &Path) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.write_all(b"\n")?;
    tmp.flush()?;
    tmp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Append-only result list for one (model, k), rewritten on every push.
#[derive(Debug)]
pub struct ResultWriter {
    path: PathBuf,
    records: Vec<ResultRecord>,
}

impl ResultWriter {
    /// Starts empty and immediately replaces any existing file at `path`
    /// with `[]`.
    pub fn new(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let writer = Self {
            path: path.into(),
            records: Vec::new(),
        };
        writer.flush()?;
        Ok(writer)
    }

    pub fn push(&mut self, record: ResultRecord) -> anyhow::Result<()> {
        self.records.push(record);
        self.flush()
    }

    pub fn flush(&self) -> anyhow::Result<()> {
        write_json_atomic(&self.records, &self.path)
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn read_results(path: &Path) -> anyhow::Result<Vec<ResultRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read results {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid result file {}", path.display()))
}

pub fn write_summary(summary: &RunSummary, out: &Path) -> anyhow::Result<()> {
    write_json_atomic(summary, out)
}
