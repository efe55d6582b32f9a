use super::super::args::RunArgs;
use crate::exit_codes;
use dxbench_core::config::{load_config, EvalConfig, ProviderKind, RunMode};
use dxbench_core::errors::{ConfigError, RunError};
use dxbench_core::providers::{build_client, Credentials};
use dxbench_core::report::console::{default_progress_sink, format_summary};
use dxbench_core::Runner;

/// Secrets come from the environment only, never from the config file.
fn credentials_from_env() -> Credentials {
    Credentials {
        openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
        local_api_key: std::env::var("DXBENCH_LOCAL_API_KEY")
            .ok()
            .filter(|k| !k.is_empty()),
    }
}

fn apply_overrides(cfg: &mut EvalConfig, args: &RunArgs) -> Result<(), ConfigError> {
    if let Some(model) = &args.model {
        cfg.model = model.clone();
    }
    if !args.ks.is_empty() {
        cfg.ks = args.ks.clone();
    }
    if let Some(mode) = &args.mode {
        cfg.mode = RunMode::parse(mode)?;
    }
    if let Some(provider) = &args.provider {
        cfg.provider = ProviderKind::parse(provider)?;
    }
    if args.limit.is_some() {
        cfg.limit = args.limit;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(dir) = &args.output_dir {
        cfg.output_dir = dir.clone();
    }
    cfg.validate()
}

fn fail(err: anyhow::Error) -> i32 {
    let classified = RunError::from_anyhow(&err);
    tracing::error!(kind = ?classified.kind, "{}", classified.message);
    eprintln!("error: {}", classified.message);
    exit_codes::for_kind(classified.kind)
}

pub(crate) async fn run(args: RunArgs) -> anyhow::Result<i32> {
    let mut cfg = match load_config(&args.config) {
        Ok(c) => c,
        Err(e) => return Ok(fail(e.into())),
    };
    if let Err(e) = apply_overrides(&mut cfg, &args) {
        return Ok(fail(e.into()));
    }

    let client = match build_client(&cfg, &credentials_from_env()) {
        Ok(c) => c,
        Err(e) => return Ok(fail(e)),
    };
    let runner = match Runner::from_config(cfg, client) {
        Ok(r) => r,
        Err(e) => return Ok(fail(e)),
    };

    match runner.run_all(Some(default_progress_sink())).await {
        Ok(summary) => {
            print!("{}", format_summary(&summary));
            Ok(exit_codes::SUCCESS)
        }
        Err(e) => Ok(fail(e)),
    }
}
