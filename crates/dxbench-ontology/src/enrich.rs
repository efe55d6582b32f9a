//! Label enrichment: bounded-parallel lookups with a single writer.
//!
//! Workers only resolve labels. The coordinating task owns the label map,
//! inserts each completed match and rewrites the output file after every
//! completion, so an interrupted run leaves a valid, partial map on disk.

use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::client::DiseaseLookup;
use crate::error::{OntologyError, OntologyResult};
use crate::types::OrphaDisease;

pub const DEFAULT_WORKERS: usize = 4;

/// Label -> record, for labels that matched.
pub type LabelMap = BTreeMap<String, OrphaDisease>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichReport {
    pub labels: usize,
    pub matched: usize,
    pub unmatched: usize,
}

pub struct Enricher {
    lookup: Arc<dyn DiseaseLookup>,
    workers: usize,
    out: PathBuf,
}

impl Enricher {
    pub fn new(lookup: Arc<dyn DiseaseLookup>, out: impl Into<PathBuf>) -> Self {
        Self {
            lookup,
            workers: DEFAULT_WORKERS,
            out: out.into(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn out(&self) -> &Path {
        &self.out
    }

    /// Look up every distinct label. The first fatal lookup error aborts the
    /// remaining lookups; matches recorded before it stay in the output file.
    pub async fn run(&self, labels: Vec<String>) -> OntologyResult<(LabelMap, EnrichReport)> {
        if self.workers == 0 {
            return Err(OntologyError::Config {
                message: "workers must be at least 1".into(),
            });
        }
        let labels = dedup(labels);
        let total = labels.len();
        info!(labels = total, workers = self.workers, out = %self.out.display(), "enriching labels");

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();
        for label in labels {
            let lookup = Arc::clone(&self.lookup);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(p) => p,
                    Err(e) => {
                        let err = OntologyError::Worker {
                            message: e.to_string(),
                        };
                        return (label, Err(err));
                    }
                };
                let result = lookup.lookup(&label).await;
                (label, result)
            });
        }

        let mut map = LabelMap::new();
        write_map(&map, &self.out)?;
        let mut done = 0usize;
        while let Some(joined) = tasks.join_next().await {
            let (label, result) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    tasks.abort_all();
                    return Err(OntologyError::Worker {
                        message: e.to_string(),
                    });
                }
            };
            done += 1;
            match result {
                Ok(Some(record)) => {
                    debug!(label = %label, orphacode = record.orphacode, "matched");
                    map.insert(label, record);
                }
                Ok(None) => debug!(label = %label, "no match"),
                Err(e) => {
                    warn!(label = %label, error = %e, "lookup failed, aborting enrichment");
                    tasks.abort_all();
                    return Err(e);
                }
            }
            write_map(&map, &self.out)?;
            info!("enriched {}/{} labels ({} matched)", done, total, map.len());
        }

        let report = EnrichReport {
            labels: total,
            matched: map.len(),
            unmatched: total - map.len(),
        };
        Ok((map, report))
    }
}

fn dedup(labels: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .into_iter()
        .filter(|l| seen.insert(l.clone()))
        .collect()
}

fn io_err(path: &Path, e: impl std::fmt::Display) -> OntologyError {
    OntologyError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Replace `path` with the JSON map via a sibling temp file.
pub fn write_map(map: &LabelMap, path: &Path) -> OntologyResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| io_err(dir, e))?;
    serde_json::to_writer_pretty(&mut tmp, map).map_err(|e| io_err(path, e))?;
    tmp.write_all(b"\n").map_err(|e| io_err(path, e))?;
    tmp.persist(path).map_err(|e| io_err(path, e.error))?;
    Ok(())
}

#[derive(Deserialize)]
struct LabeledCase {
    groundtruth_diagnosis: String,
}

/// Distinct ground-truth labels of a dataset file, in first-appearance order.
pub fn labels_from_dataset(path: &Path) -> OntologyResult<Vec<String>> {
    let raw = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let cases: Vec<LabeledCase> = serde_json::from_str(&raw).map_err(|e| io_err(path, e))?;
    Ok(dedup(
        cases.into_iter().map(|c| c.groundtruth_diagnosis).collect(),
    ))
}

/// One label per line; blank lines are skipped.
pub fn labels_from_file(path: &Path) -> OntologyResult<Vec<String>> {
    let raw = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    Ok(dedup(
        raw.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect(),
    ))
}
