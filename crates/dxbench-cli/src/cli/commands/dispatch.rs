use super::super::args::{Cli, Command};

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Run(args) => super::run::run(args).await,
        Command::Enrich(args) => super::enrich::run(args).await,
        Command::Summarize(args) => super::summarize::run(args),
    }
}
