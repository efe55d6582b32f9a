pub mod console;
pub mod json;
pub mod progress;

use crate::config::{RunMode, Variant};
use crate::model::{ResultRecord, Verdict};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Accuracy for one distractor count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KSummary {
    pub k: usize,
    pub total: usize,
    pub correct: usize,
    /// Rows whose completion could not be parsed into a verdict.
    pub parse_failures: usize,
    pub accuracy: f64,
}

impl KSummary {
    pub fn from_records(k: usize, records: &[ResultRecord]) -> Self {
        let total = records.len();
        let correct = records.iter().filter(|r| r.accuracy == 1).count();
        let parse_failures = records
            .iter()
            .filter(|r| matches!(r.response, Verdict::Raw(_)))
            .count();
        let accuracy = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        };
        Self {
            k,
            total,
            correct,
            parse_failures,
            accuracy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub model: String,
    pub provider: String,
    pub variant: Variant,
    pub mode: RunMode,
    pub seed: u64,
    pub generated_at: String,
    pub per_k: Vec<KSummary>,
}

/// Accuracy of one result file, keyed by the model and k in its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFileSummary {
    pub model: String,
    #[serde(flatten)]
    pub summary: KSummary,
}

/// Split `{model}_{k}.json` into its parts. The model part keeps any
/// underscores it had (`/` was already replaced by `_` on write).
pub fn parse_result_file_name(name: &str) -> Option<(String, usize)> {
    let stem = name.strip_suffix(".json")?;
    let (model, k) = stem.rsplit_once('_')?;
    if model.is_empty() {
        return None;
    }
    Some((model.to_string(), k.parse().ok()?))
}

/// Recompute per-k accuracy from every result file in `dir`, sorted by model then k.
/// Files whose names do not follow the result naming scheme are skipped.
pub fn summarize_dir(dir: &Path) -> anyhow::Result<Vec<ResultFileSummary>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read results directory {}", dir.display()))?;
    let mut out = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some((model, k)) = parse_result_file_name(name) else {
            tracing::debug!(file = name, "skipping non-result file");
            continue;
        };
        let records = json::read_results(&path)?;
        out.push(ResultFileSummary {
            model,
            summary: KSummary::from_records(k, &records),
        });
    }
    out.sort_by(|a, b| (&a.model, a.summary.k).cmp(&(&b.model, b.summary.k)));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(accuracy: u8, response: Verdict) -> ResultRecord {
        ResultRecord {
            case_index: 0,
            prompt: String::new(),
            accuracy,
            response,
            predicted_diagnosis: None,
            groundtruth_diagnosis: "A".into(),
            candidates_shown: vec!["A".into()],
            reasoning_trace: None,
        }
    }

    #[test]
    fn counts_correct_and_unparsed_rows() {
        let rows = vec![
            row(1, Verdict::Structured(Default::default())),
            row(0, Verdict::Structured(Default::default())),
            row(0, Verdict::Raw("??".into())),
            row(1, Verdict::Structured(Default::default())),
        ];
        let s = KSummary::from_records(9, &rows);
        assert_eq!(s.total, 4);
        assert_eq!(s.correct, 2);
        assert_eq!(s.parse_failures, 1);
        assert!((s.accuracy - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_run_has_zero_accuracy() {
        let s = KSummary::from_records(4, &[]);
        assert_eq!(s.accuracy, 0.0);
    }

    #[test]
    fn result_file_names_split_on_last_underscore() {
        assert_eq!(
            parse_result_file_name("Qwen_Qwen3-8B_49.json"),
            Some(("Qwen_Qwen3-8B".to_string(), 49))
        );
        assert_eq!(parse_result_file_name("summary.json"), None);
        assert_eq!(parse_result_file_name("_4.json"), None);
        assert_eq!(parse_result_file_name("model_4.txt"), None);
    }

    #[test]
    fn summarize_dir_reads_result_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut w9 = json::ResultWriter::new(dir.path().join("gpt-5.2_9.json")).unwrap();
        w9.push(row(1, Verdict::Structured(Default::default()))).unwrap();
        w9.push(row(0, Verdict::Raw("x".into()))).unwrap();
        let mut w4 = json::ResultWriter::new(dir.path().join("gpt-5.2_4.json")).unwrap();
        w4.push(row(1, Verdict::Structured(Default::default()))).unwrap();
        std::fs::write(dir.path().join("summary.json"), "{}").unwrap();

        let rows = summarize_dir(dir.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].summary.k, 4);
        assert_eq!(rows[1].summary.k, 9);
        assert_eq!(rows[1].summary.parse_failures, 1);
        assert!(rows.iter().all(|r| r.model == "gpt-5.2"));
    }
}
