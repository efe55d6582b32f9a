//! Extraction of the model's verdict from free-form completion text.

use crate::model::{ParsedVerdict, Verdict};

/// Closing tag emitted by reasoning models before their answer.
pub const END_OF_REASONING: &str = "</think>";
pub const JSON_FENCE_OPEN: &str = "```json";
pub const FENCE: &str = "```";

/// Parse a completion into a [`Verdict`]. Never fails: anything that is not
/// a JSON object with string-typed `reasoning` / `final_diagnosis` comes back
/// as [`Verdict::Raw`] holding the original text.
pub fn parse_response(text: &str) -> Verdict {
    let mut body = text;
    if let Some((_, after)) = body.split_once(END_OF_REASONING) {
        body = after;
    }
    if let Some((_, after)) = body.split_once(JSON_FENCE_OPEN) {
        body = after.split_once(FENCE).map_or(after, |(inner, _)| inner).trim();
    }

    match serde_json::from_str::<ParsedVerdict>(body) {
        Ok(v) => Verdict::Structured(v),
        Err(_) => Verdict::Raw(text.to_string()),
    }
}
