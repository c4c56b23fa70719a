use std::io;

use aerobook_cli::{bootstrap, Session};
use aerobook_store::app_config::Config;
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;

    // Logs go to stderr so they never interleave with the prompts on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!(
        "Starting AeroBook with catalog {} and reservations {}",
        config.files.catalog.display(),
        config.files.reservations.display()
    );

    let mut startup = bootstrap(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&mut startup.engine, stdin.lock(), stdout.lock());
    session.report_warnings(&startup.warnings)?;
    session.run()?;

    Ok(())
}
