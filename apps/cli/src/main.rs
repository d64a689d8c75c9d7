use anyhow::Context;
use clap::Parser;
use evhub::Platform;
use evhub::kernel::prelude::{AppConfig, load_config};
use evhub_cli::{Cli, run};
use evhub_logger::Logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: AppConfig =
        load_config(cli.config.as_ref()).context("Critical: Configuration is malformed")?;

    let _log = Logger::builder(env!("CARGO_PKG_NAME")).config(&cfg.logging)?.init()?;

    let platform = Platform::connect(&cfg).await?;

    let mut stdout = std::io::stdout().lock();
    run(&platform, cli.command, &mut stdout).await
}
