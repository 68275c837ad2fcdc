use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod client;
mod dump;
mod error;
mod manager;
mod scheme;
mod signals;

#[cfg(test)]
mod test_utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::Cli::parse().run().await
}
