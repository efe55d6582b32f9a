use crate::config::{load_dataset, EvalConfig, RunMode};
use crate::errors::{DatasetError, ProviderError};
use crate::model::{CaseRecord, EvaluationInstance};
use crate::prompt::{PromptBuilder, PromptTemplate};
use crate::providers::llm::LlmClient;
use crate::report::json::{write_summary, ResultWriter};
use crate::report::progress::{ProgressEvent, ProgressSink};
use crate::report::{KSummary, RunSummary};
use crate::score::evaluate;
use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

pub struct Runner {
    pub client: Arc<dyn LlmClient>,
    pub cfg: EvalConfig,
    pub template: PromptTemplate,
    pub cases: Vec<CaseRecord>,
    /// Base seed; each k samples from its own `StdRng` seeded with `seed + k`.
    pub seed: u64,
}

impl Runner {
    pub fn new(
        client: Arc<dyn LlmClient>,
        cfg: EvalConfig,
        template: PromptTemplate,
        mut cases: Vec<CaseRecord>,
    ) -> Self {
        if let Some(limit) = cfg.limit {
            cases.truncate(limit);
        }
        let seed = cfg.seed.unwrap_or_else(|| {
            let s: u64 = rand::random();
            tracing::info!(seed = s, "no seed configured, using a generated one");
            s
        });
        Self {
            client,
            cfg,
            template,
            cases,
            seed,
        }
    }

    /// Load the template and dataset named in `cfg`.
    pub fn from_config(cfg: EvalConfig, client: Arc<dyn LlmClient>) -> anyhow::Result<Self> {
        let template = PromptTemplate::load(&cfg.prompt_template)?;
        let cases = load_dataset(&cfg.dataset)?;
        tracing::info!(
            cases = cases.len(),
            dataset = %cfg.dataset.display(),
            "dataset loaded"
        );
        Ok(Self::new(client, cfg, template, cases))
    }

    pub fn build_instances(&self, k: usize) -> Result<Vec<EvaluationInstance>, DatasetError> {
        let builder =
            PromptBuilder::new(&self.template, self.cfg.variant, self.cfg.description_policy);
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(k as u64));
        self.cases
            .iter()
            .enumerate()
            .map(|(i, case)| builder.build(i, case, k, &mut rng))
            .collect()
    }

    /// Evaluate every case for one k. The result file is reset to `[]` up
    /// front and rewritten after each scored case; a backend failure aborts
    /// with whatever was written so far.
    pub async fn run_k(&self, k: usize, progress: Option<&ProgressSink>) -> anyhow::Result<KSummary> {
        let instances = self
            .build_instances(k)
            .with_context(|| format!("building prompts for k={}", k))?;
        let total = instances.len();
        let mut writer = ResultWriter::new(self.cfg.result_path(k))?;
        tracing::info!(k, cases = total, mode = ?self.cfg.mode, out = %writer.path().display(), "evaluating");

        let report = |done: usize| {
            if let Some(sink) = progress {
                (**sink)(ProgressEvent { k, done, total });
            }
        };

        match self.cfg.mode {
            RunMode::Sequential => {
                for inst in &instances {
                    let response = self
                        .client
                        .complete(&inst.prompt)
                        .await
                        .with_context(|| format!("case {} (k={})", inst.case_index, k))?;
                    writer.push(evaluate(inst, &response))?;
                    report(writer.records().len());
                }
            }
            RunMode::Batched => {
                let prompts: Vec<String> = instances.iter().map(|i| i.prompt.clone()).collect();
                let responses = self
                    .client
                    .complete_batch(&prompts)
                    .await
                    .with_context(|| format!("batch generation for k={}", k))?;
                if responses.len() != instances.len() {
                    return Err(ProviderError::BatchLength {
                        provider: self.client.provider_name().to_string(),
                        expected: instances.len(),
                        got: responses.len(),
                    }
                    .into());
                }
                for (inst, response) in instances.iter().zip(&responses) {
                    writer.push(evaluate(inst, response))?;
                    report(writer.records().len());
                }
            }
        }

        let summary = KSummary::from_records(k, writer.records());
        tracing::info!(
            k,
            accuracy = summary.accuracy,
            correct = summary.correct,
            unparsed = summary.parse_failures,
            "k finished"
        );
        Ok(summary)
    }

    /// Run every configured k in order and write `summary.json`.
    pub async fn run_all(&self, progress: Option<ProgressSink>) -> anyhow::Result<RunSummary> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut per_k = Vec::with_capacity(self.cfg.ks.len());
        for &k in &self.cfg.ks {
            per_k.push(self.run_k(k, progress.as_ref()).await?);
        }

        let summary = RunSummary {
            run_id,
            model: self.cfg.model.clone(),
            provider: self.client.provider_name().to_string(),
            variant: self.cfg.variant,
            mode: self.cfg.mode,
            seed: self.seed,
            generated_at: chrono::Utc::now().to_rfc3339(),
            per_k,
        };
        write_summary(&summary, &self.cfg.summary_path())?;
        Ok(summary)
    }
}
