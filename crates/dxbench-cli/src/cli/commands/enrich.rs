use super::super::args::EnrichArgs;
use crate::exit_codes;
use dxbench_ontology::{
    labels_from_dataset, labels_from_file, Enricher, OntologyConfig, OntologyError,
    OrphadataClient,
};
use std::sync::Arc;

fn exit_code_for(err: &OntologyError) -> i32 {
    match err {
        OntologyError::Config { .. } | OntologyError::Io { .. } => exit_codes::CONFIG_ERROR,
        _ => exit_codes::RUN_FAILED,
    }
}

pub(crate) async fn run(args: EnrichArgs) -> anyhow::Result<i32> {
    let labels = match (&args.dataset, &args.labels) {
        (Some(dataset), _) => labels_from_dataset(dataset),
        (None, Some(file)) => labels_from_file(file),
        (None, None) => Err(OntologyError::Config {
            message: "one of --dataset or --labels is required".into(),
        }),
    };
    let labels = match labels {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(exit_code_for(&e));
        }
    };

    let mut config = OntologyConfig::from_env();
    if let Some(url) = &args.url {
        config = config.with_url(url.clone());
    }
    if let Some(lang) = &args.lang {
        config = config.with_lang(lang);
    }

    let client = match OrphadataClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(exit_code_for(&e));
        }
    };

    let enricher = Enricher::new(Arc::new(client), &args.out).with_workers(args.workers);
    match enricher.run(labels).await {
        Ok((_, report)) => {
            println!(
                "{} labels, {} matched, {} without an Orphanet match -> {}",
                report.labels,
                report.matched,
                report.unmatched,
                enricher.out().display()
            );
            Ok(exit_codes::SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, "enrichment aborted");
            eprintln!("error: {}", e);
            Ok(exit_code_for(&e))
        }
    }
}
