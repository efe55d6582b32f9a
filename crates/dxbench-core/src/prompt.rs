//! Prompt templates and the candidate-list sampler.
//!
//! Templates use format-string placeholders: `{current_case_prompt}` and
//! `{current_choices}`, with `{{` / `}}` for literal braces (so the JSON
//! schema shown to the model can be written inline).

use crate::config::{DescriptionPolicy, Variant};
use crate::errors::{ConfigError, DatasetError};
use crate::model::{CaseRecord, EvaluationInstance};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;

pub const CASE_PLACEHOLDER: &str = "current_case_prompt";
pub const CHOICES_PLACEHOLDER: &str = "current_choices";

/// Filler used by [`DescriptionPolicy::Pad`].
pub const MISSING_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Case,
    Choices,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

#[derive(Deserialize)]
struct TemplateFile {
    prompt_template: String,
}

impl PromptTemplate {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => name.push(ch),
                            None => {
                                return Err(ConfigError(format!(
                                    "unterminated placeholder '{{{}' in prompt template",
                                    name
                                )))
                            }
                        }
                    }
                    let seg = match name.as_str() {
                        CASE_PLACEHOLDER => Segment::Case,
                        CHOICES_PLACEHOLDER => Segment::Choices,
                        other => {
                            return Err(ConfigError(format!(
                                "unknown placeholder '{{{}}}' in prompt template",
                                other
                            )))
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(seg);
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(ConfigError(
                        "single '}' in prompt template (use '}}' for a literal brace)".into(),
                    ))
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Load a YAML file with a `prompt_template` key.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConfigError(format!(
                "failed to read prompt template {}: {}",
                path.display(),
                e
            ))
        })?;
        let file: TemplateFile = serde_yaml::from_str(&raw).map_err(|e| {
            ConfigError(format!(
                "failed to parse prompt template {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&file.prompt_template)
    }

    pub fn render(&self, case: &str, choices: &str) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => out.push_str(s),
                Segment::Case => out.push_str(case),
                Segment::Choices => out.push_str(choices),
            }
        }
        out
    }
}

/// Builds evaluation instances: `k` distractors drawn with replacement, the
/// ground truth appended, then the whole list shuffled.
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    template: &'a PromptTemplate,
    variant: Variant,
    policy: DescriptionPolicy,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(template: &'a PromptTemplate, variant: Variant, policy: DescriptionPolicy) -> Self {
        Self {
            template,
            variant,
            policy,
        }
    }

    pub fn build<R: Rng + ?Sized>(
        &self,
        case_index: usize,
        case: &CaseRecord,
        k: usize,
        rng: &mut R,
    ) -> Result<EvaluationInstance, DatasetError> {
        let distractors = sample_with_replacement(&case.candidates, k, rng)
            .ok_or(DatasetError::EmptyCandidatePool {
                index: case_index,
                k,
            })?;

        let mut shown = match self.variant {
            Variant::Zeroshot => {
                let mut shown = distractors;
                shown.push(case.groundtruth_diagnosis.clone());
                shown
            }
            Variant::ZeroshotWithDescription => self.describe(case_index, case, distractors)?,
        };
        shown.shuffle(rng);

        let prompt = self.template.render(&case.case_prompt, &shown.join("\n"));
        Ok(EvaluationInstance {
            case_index,
            k,
            prompt,
            groundtruth_diagnosis: case.groundtruth_diagnosis.clone(),
            candidates_shown: shown,
        })
    }

    fn describe(
        &self,
        case_index: usize,
        case: &CaseRecord,
        distractors: Vec<String>,
    ) -> Result<Vec<String>, DatasetError> {
        let payload = case.description.clone().unwrap_or_default();
        let descriptions = &payload.candidate_descriptions;

        if descriptions.len() < distractors.len() && self.policy == DescriptionPolicy::Strict {
            return Err(DatasetError::DescriptionMismatch {
                index: case_index,
                needed: distractors.len(),
                available: descriptions.len(),
            });
        }
        let gt_description = match payload.gt_description.trim() {
            "" if self.policy == DescriptionPolicy::Strict => {
                return Err(DatasetError::MissingGtDescription { index: case_index })
            }
            "" => MISSING_DESCRIPTION,
            d => d,
        };

        let mut shown: Vec<String> = distractors
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let d = descriptions
                    .get(i)
                    .map(String::as_str)
                    .unwrap_or(MISSING_DESCRIPTION);
                with_description(choice, d)
            })
            .collect();
        shown.push(with_description(
            &case.groundtruth_diagnosis,
            gt_description,
        ));
        Ok(shown)
    }
}

fn with_description(name: &str, description: &str) -> String {
    format!("{} (Description: {})", name, description)
}

/// `None` only when `k > 0` and the pool is empty.
fn sample_with_replacement<R: Rng + ?Sized>(
    pool: &[String],
    k: usize,
    rng: &mut R,
) -> Option<Vec<String>> {
    (0..k).map(|_| pool.choose(rng).cloned()).collect()
}
