use crate::report::progress::{ProgressEvent, ProgressSink};
use crate::report::{KSummary, ResultFileSummary, RunSummary};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Format a single progress line. Deterministic, unit-testable.
#[must_use]
pub fn format_progress_line(k: usize, done: usize, total: usize) -> String {
    format!("[k={}] evaluated {}/{} cases", k, done, total)
}

/// Minimum interval between progress updates to avoid log spam.
const PROGRESS_MIN_INTERVAL_MS: u64 = 200;

/// For large datasets, emit at most every this many cases (10% steps).
pub(crate) fn progress_step(total: usize) -> usize {
    if total <= 10 {
        1
    } else {
        std::cmp::max(1, total / 10)
    }
}

/// Throttled sink that logs progress lines. Always emits on done == total.
pub fn default_progress_sink() -> ProgressSink {
    let state = Arc::new(Mutex::new(None::<Instant>));
    Arc::new(move |ev: ProgressEvent| {
        if ev.total == 0 {
            return;
        }
        let now = Instant::now();
        let step = progress_step(ev.total);
        let should_emit = {
            let mut last_emit = state.lock().expect("progress throttle lock");
            let emit_final = ev.done == ev.total;
            let emit_step = ev.done % step == 0 || ev.done == 1;
            let interval_ok = last_emit
                .map(|t| {
                    now.saturating_duration_since(t)
                        >= Duration::from_millis(PROGRESS_MIN_INTERVAL_MS)
                })
                .unwrap_or(true);
            let ok = emit_final || (emit_step && interval_ok);
            if ok {
                *last_emit = Some(now);
            }
            ok
        };
        if should_emit {
            tracing::info!("{}", format_progress_line(ev.k, ev.done, ev.total));
        }
    })
}

pub fn format_k_row(s: &KSummary) -> String {
    format!(
        "{:>6}  {:>6}  {:>7}  {:>8.2}%  {:>9}",
        s.k,
        s.total,
        s.correct,
        s.accuracy * 100.0,
        s.parse_failures
    )
}

/// Render the accuracy table printed at the end of a run.
pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = format!(
        "model: {} ({}), variant: {:?}, seed: {}\n",
        summary.model, summary.provider, summary.variant, summary.seed
    );
    out.push_str("     k   cases  correct   accuracy  unparsed\n");
    for s in &summary.per_k {
        out.push_str(&format_k_row(s));
        out.push('\n');
    }
    out
}

/// Table for `summarize`: one row per result file.
pub fn format_file_summaries(rows: &[ResultFileSummary]) -> String {
    let width = rows.iter().map(|r| r.model.len()).max().unwrap_or(5).max(5);
    let mut out = format!(
        "{:<width$}       k   cases  correct   accuracy  unparsed\n",
        "model",
        width = width
    );
    for r in rows {
        out.push_str(&format!("{:<width$}  {}\n", r.model, format_k_row(&r.summary), width = width));
    }
    out
}
