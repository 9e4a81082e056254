mod cli;
mod context;
mod handlers;
mod output;

use basket_core::AppConfig;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use tracing_subscriber::EnvFilter;

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("BASKET_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(log_file))
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}

async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let db_path = cli
        .db
        .unwrap_or_else(|| config.effective_database_path());
    let ctx = CliContext::open(&db_path, &config).await?;

    match cli.command {
        Commands::List(list_cmd) => handlers::list::handle(&ctx, list_cmd.action).await?,
        Commands::Shop(shop_cmd) => handlers::shop::handle(&ctx, shop_cmd.action).await?,
        Commands::Completions { .. } => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "basket", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::load();
    if let Err(e) = run(cli, config).await {
        tracing::debug!("Command failed: {:?}", e);
        output::output_error(&e.to_string());
    }

    Ok(())
}
