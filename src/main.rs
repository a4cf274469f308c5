use anyhow::Context;
use clap::Parser;
use course_register::utils::logger;
use course_register::{CliConfig, ConfigProvider, Console, LocalStorage, Registry};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = cli
        .resolve()
        .context("Failed to load configuration")?;

    logger::init_cli_logger(cli.verbose, config.log_level.as_deref());
    tracing::debug!("Resolved config: {:?}", config);

    let mut registry = Registry::with_catalog(config.catalog());
    let storage = LocalStorage::default();
    let mut console = Console::new(
        storage,
        config.data_file(),
        io::stdin().lock(),
        io::stdout(),
    );

    console
        .run(&mut registry)
        .context("Lost the operator console")?;

    tracing::debug!("Exiting with {} student(s) in memory", registry.students().len());
    Ok(())
}
