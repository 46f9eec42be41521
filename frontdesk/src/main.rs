use anyhow::Context;
use clap::Parser;
use frontdesk::{AgentArgs, AgentConfig, build_frontdesk, run_repl};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = AgentConfig::from_args(AgentArgs::parse())?;
    let frontdesk = build_frontdesk(&config).context("failed to build the model provider")?;

    eprintln!(
        "Running {} in CLI mode. Logs dir: {}",
        frontdesk.model(),
        config.event_log.dir.display()
    );

    run_repl(
        &frontdesk,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
    .context("terminal I/O failed")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
