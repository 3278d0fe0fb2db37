use clap::Parser;
use treesync::config::Cli;
use treesync::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the JSON change log
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::try_from(cli)?;
    tracing::debug!("treesync v{}", treesync::VERSION);

    if let Err(err) = treesync::commands::sync::run(&config) {
        if err.is_recoverable() {
            tracing::warn!("Target left untouched; fix the input and run again");
        }
        return Err(err.into());
    }

    Ok(())
}
