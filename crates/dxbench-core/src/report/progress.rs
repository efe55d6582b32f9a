//! Progress reporting. The runner emits done/total after each scored case;
//! the console layer consumes it via a sink.

use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent {
    pub k: usize,
    pub done: usize,
    pub total: usize,
}

/// Implementations may throttle (e.g. max N updates/sec or every n cases).
pub type ProgressSink = Arc<dyn Fn(ProgressEvent) + Send + Sync>;
