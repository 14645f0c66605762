use std::path::PathBuf;

use anyhow::Context;
use cepfetch_core::{
    config::Config, provider_factory::ProviderRegistry, race::Racer, report::render,
};
use clap::Parser;
use futures_util::StreamExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Look up Brazilian postal codes, first answer from ViaCEP or APICEP wins"
)]
struct Cli {
    /// Codes to look up, e.g. 01001000 or 01001-000
    #[arg(required = true, num_args = 1..)]
    codes: Vec<String>,

    /// JSON or TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-code deadline in milliseconds (overrides config)
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// How many codes are looked up at once (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    jobs: Option<u64>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut cfg = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(ms) = cli.deadline_ms {
        cfg.race.deadline_ms = ms;
    }
    if let Some(jobs) = cli.jobs {
        cfg.race.concurrency = jobs as usize;
    }

    let reg = ProviderRegistry::from_config(&cfg)?;
    let providers = reg.names().join(",");
    let racer = Racer::new(reg, &cfg.race);
    tracing::debug!(
        providers = %providers,
        deadline_ms = racer.deadline().as_millis() as u64,
        concurrency = racer.concurrency(),
        "starting lookups"
    );

    let mut outcomes = std::pin::pin!(racer.run(cli.codes));
    while let Some((code, outcome)) = outcomes.next().await {
        tracing::debug!(cep.code = %code, timeout = outcome.is_timeout(), "resolved");
        println!("{}\n", render(&outcome));
    }

    Ok(())
}
