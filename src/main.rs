//! burpline binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use burpline::api::ApiClient;
use burpline::cli::{self, Cli};
use burpline::config::EndpointConfig;
use burpline::output;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = EndpointConfig::new(&cli.host, cli.port, &cli.key);
    let api = ApiClient::new(&config)?;

    cli::run_command(&api, &cli.command, &config.address(), cli.quiet).await?;

    Ok(())
}

/// Initialize tracing. `--verbose` raises the default level to debug;
/// `RUST_LOG` still takes precedence either way.
fn init_logging(verbose: bool) {
    let default = if verbose { "burpline=debug" } else { "burpline=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
