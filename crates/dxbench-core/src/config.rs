use crate::errors::{ConfigError, DatasetError};
use crate::model::CaseRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Which prompt family to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Zeroshot,
    #[serde(rename = "zeroshot_w_description")]
    ZeroshotWithDescription,
}

/// What to do when a case has fewer descriptions than sampled candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionPolicy {
    #[default]
    Strict,
    Pad,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Hosted API for "gpt" models, local server for everything else.
    #[default]
    Auto,
    Openai,
    Local,
    Fake,
}

impl ProviderKind {
    pub fn resolve(self, model: &str) -> ProviderKind {
        match self {
            ProviderKind::Auto if model.to_lowercase().contains("gpt") => ProviderKind::Openai,
            ProviderKind::Auto => ProviderKind::Local,
            other => other,
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "openai" => Ok(Self::Openai),
            "local" => Ok(Self::Local),
            "fake" => Ok(Self::Fake),
            other => Err(ConfigError(format!(
                "unknown provider '{}' (expected auto|openai|local|fake)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// One request per case, results flushed as they come in.
    #[default]
    Sequential,
    /// All prompts of a k submitted together, then scored.
    Batched,
}

impl RunMode {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "batched" => Ok(Self::Batched),
            other => Err(ConfigError(format!(
                "unknown mode '{}' (expected sequential|batched)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Concurrent requests in batched mode.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Unset means the server decides (usually the model context length).
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Only sent to the local backend; hosted reasoning models reject it.
    #[serde(default)]
    pub temperature: f32,
}

fn default_concurrency() -> usize {
    8
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
            max_tokens: None,
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiSettings {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalSettings {
    #[serde(default = "default_local_base_url")]
    pub base_url: String,
    /// Device-parallel degree the server was started with; recorded, not enforced.
    #[serde(default)]
    pub tensor_parallel: Option<u32>,
}

fn default_local_base_url() -> String {
    "http://localhost:1206/v1".to_string()
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            base_url: default_local_base_url(),
            tensor_parallel: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalConfig {
    pub version: u32,
    pub dataset: PathBuf,
    pub prompt_template: PathBuf,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub description_policy: DescriptionPolicy,
    pub model: String,
    #[serde(default)]
    pub provider: ProviderKind,
    /// Canned completion for the fake provider.
    #[serde(default)]
    pub fake_response: Option<String>,
    pub ks: Vec<usize>,
    #[serde(default)]
    pub mode: RunMode,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Evaluate only the first N cases.
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub openai: OpenAiSettings,
    #[serde(default)]
    pub local: LocalSettings,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

impl EvalConfig {
    /// Relative dataset/template paths are resolved against the config file's directory.
    fn resolve_paths(&mut self, base: &Path) {
        for p in [
            &mut self.dataset,
            &mut self.prompt_template,
            &mut self.output_dir,
        ] {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError(format!(
                "unsupported config version {} (supported: {})",
                self.version, SUPPORTED_CONFIG_VERSION
            )));
        }
        if self.ks.is_empty() {
            return Err(ConfigError("config has no ks".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError("model must not be empty".into()));
        }
        if self.settings.concurrency == 0 {
            return Err(ConfigError("settings.concurrency must be at least 1".into()));
        }
        if self.provider == ProviderKind::Fake && self.fake_response.is_none() {
            return Err(ConfigError(
                "provider 'fake' requires fake_response".into(),
            ));
        }
        Ok(())
    }

    /// Result file for one k: `{output_dir}/{model with '/' -> '_'}_{k}.json`.
    pub fn result_path(&self, k: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.json", self.model.replace('/', "_"), k))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join("summary.json")
    }
}

pub fn load_config(path: &Path) -> Result<EvalConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    let mut cfg: EvalConfig = serde_yaml::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;
    cfg.validate()?;
    if let Some(base) = path.parent() {
        cfg.resolve_paths(base);
    }
    Ok(cfg)
}

pub fn load_dataset(path: &Path) -> Result<Vec<CaseRecord>, DatasetError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|e| DatasetError::Parse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let p = dir.join(name);
        std::fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn loads_minimal_config_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "eval.yaml",
            "version: 1\ndataset: data.json\nprompt_template: prompts/zeroshot.yml\nmodel: Qwen/Qwen3-8B\nks: [199, 59, 9]\n",
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.variant, Variant::Zeroshot);
        assert_eq!(cfg.mode, RunMode::Sequential);
        assert_eq!(cfg.provider.resolve(&cfg.model), ProviderKind::Local);
        assert_eq!(cfg.dataset, dir.path().join("data.json"));
        assert_eq!(
            cfg.result_path(59),
            dir.path().join("results").join("Qwen_Qwen3-8B_59.json")
        );
    }

    #[test]
    fn rejects_unknown_fields_and_versions() {
        let dir = tempfile::tempdir().unwrap();
        let unknown = write(
            dir.path(),
            "a.yaml",
            "version: 1\ndataset: d\nprompt_template: t\nmodel: m\nks: [1]\nkk: 3\n",
        );
        let err = load_config(&unknown).unwrap_err();
        assert!(err.0.contains("failed to parse YAML"), "{}", err);

        let v2 = write(
            dir.path(),
            "b.yaml",
            "version: 2\ndataset: d\nprompt_template: t\nmodel: m\nks: [1]\n",
        );
        assert!(load_config(&v2).unwrap_err().0.contains("unsupported"));
    }

    #[test]
    fn fake_provider_needs_a_response() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(
            dir.path(),
            "c.yaml",
            "version: 1\ndataset: d\nprompt_template: t\nmodel: m\nprovider: fake\nks: [1]\n",
        );
        assert!(load_config(&p).unwrap_err().0.contains("fake_response"));
    }

    #[test]
    fn auto_provider_routes_gpt_models_to_hosted_api() {
        assert_eq!(ProviderKind::Auto.resolve("gpt-5.2"), ProviderKind::Openai);
        assert_eq!(ProviderKind::Auto.resolve("GPT-4o"), ProviderKind::Openai);
        assert_eq!(
            ProviderKind::Auto.resolve("allenai/Olmo-3-7B-Instruct"),
            ProviderKind::Local
        );
        assert_eq!(ProviderKind::Fake.resolve("gpt-5"), ProviderKind::Fake);
    }

    #[test]
    fn dataset_errors_carry_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.json", "{not json");
        match load_dataset(&bad) {
            Err(DatasetError::Parse { path, .. }) => assert_eq!(path, bad),
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(matches!(
            load_dataset(&dir.path().join("missing.json")),
            Err(DatasetError::Read { .. })
        ));
    }
}
