use crate::model::{EvaluationInstance, LlmResponse, ResultRecord, Verdict};
use crate::parse::parse_response;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub accuracy: u8,
    pub predicted_diagnosis: Option<String>,
}

/// Exact, case-sensitive match of `final_diagnosis` against the ground truth.
pub fn score(verdict: &Verdict, groundtruth: &str) -> Score {
    match verdict {
        Verdict::Structured(v) => {
            let predicted = v.final_diagnosis.clone();
            let accuracy = u8::from(predicted.as_deref() == Some(groundtruth));
            Score {
                accuracy,
                predicted_diagnosis: predicted,
            }
        }
        Verdict::Raw(_) => Score {
            accuracy: 0,
            predicted_diagnosis: None,
        },
    }
}

/// Parse and score one completion into a result row.
pub fn evaluate(instance: &EvaluationInstance, response: &LlmResponse) -> ResultRecord {
    let verdict = parse_response(&response.text);
    let Score {
        accuracy,
        predicted_diagnosis,
    } = score(&verdict, &instance.groundtruth_diagnosis);

    ResultRecord {
        case_index: instance.case_index,
        prompt: instance.prompt.clone(),
        accuracy,
        response: verdict,
        predicted_diagnosis,
        groundtruth_diagnosis: instance.groundtruth_diagnosis.clone(),
        candidates_shown: instance.candidates_shown.clone(),
        reasoning_trace: response.reasoning.clone().filter(|r| !r.is_empty()),
    }
}
