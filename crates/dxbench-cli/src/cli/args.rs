use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dxbench",
    version,
    about = "Diagnostic-accuracy benchmark for language models on multiple-choice case reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate a model on the dataset for every configured k
    Run(RunArgs),
    /// Attach Orphanet records to diagnosis labels
    Enrich(EnrichArgs),
    /// Recompute accuracy from a directory of result files
    Summarize(SummarizeArgs),
}

#[derive(Parser, Clone, Debug)]
pub struct RunArgs {
    #[arg(long, default_value = "eval.yaml")]
    pub config: PathBuf,

    /// model name (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// distractor counts; repeat or comma-separate (overrides config)
    #[arg(long = "k", value_delimiter = ',')]
    pub ks: Vec<usize>,

    /// generation mode: sequential|batched
    #[arg(long)]
    pub mode: Option<String>,

    /// backend: auto|openai|local|fake
    #[arg(long)]
    pub provider: Option<String>,

    /// evaluate only the first N cases
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["dataset", "labels"])))]
pub struct EnrichArgs {
    /// dataset JSON; its distinct groundtruth_diagnosis values are looked up
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// file with one label per line
    #[arg(long)]
    pub labels: Option<PathBuf>,

    /// output JSON map (label -> record), rewritten after every lookup
    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = dxbench_ontology::enrich::DEFAULT_WORKERS)]
    pub workers: usize,

    #[arg(long)]
    pub lang: Option<String>,

    /// Orphadata base URL
    #[arg(long, env = "DXBENCH_ORPHADATA_URL")]
    pub url: Option<String>,
}

#[derive(Parser, Clone, Debug)]
pub struct SummarizeArgs {
    /// directory containing `{model}_{k}.json` result files
    pub results_dir: PathBuf,

    /// print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
