use serde::{Deserialize, Serialize};

/// One dataset entry: a case vignette and its candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_prompt: String,
    pub groundtruth_diagnosis: String,
    #[serde(default)]
    pub candidates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<DescriptionPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptionPayload {
    #[serde(default)]
    pub candidate_descriptions: Vec<String>,
    #[serde(default)]
    pub gt_description: String,
}

/// A fully rendered prompt for one (case, k) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationInstance {
    pub case_index: usize,
    pub k: usize,
    pub prompt: String,
    pub groundtruth_diagnosis: String,
    pub candidates_shown: Vec<String>,
}

/// Structured answer extracted from a model completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedVerdict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_diagnosis: Option<String>,
    /// Keys the model emitted beyond the two we ask for.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Parser output: either a structured verdict or the untouched completion text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Verdict {
    Structured(ParsedVerdict),
    Raw(String),
}

impl Verdict {
    pub fn is_structured(&self) -> bool {
        matches!(self, Verdict::Structured(_))
    }
}

/// One scored row of a result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default)]
    pub case_index: usize,
    pub prompt: String,
    pub accuracy: u8,
    pub response: Verdict,
    pub predicted_diagnosis: Option<String>,
    pub groundtruth_diagnosis: String,
    #[serde(rename = "candidates", alias = "candidates_shown")]
    pub candidates_shown: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_trace: Option<String>,
}

/// Completion returned by a generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    /// Separate reasoning trace, when the backend exposes one.
    #[serde(default)]
    pub reasoning: Option<String>,
    pub provider: String,
    pub model: String,
}
