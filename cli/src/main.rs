mod cli;
mod commands;
mod config;
mod context;
mod output;
mod timing;

use anyhow::Result;
use clap::Parser as _;
use directory_business::{BusinessConfig, build_state_ctx};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    timing::init_tracing(cli.verbose, cli.timing);

    let business_config = match cli.api_url {
        Some(url) => BusinessConfig::new(url),
        None => BusinessConfig::from_env(),
    };
    debug!("Using directory service at {}", business_config.api_url());

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    let ctx = build_state_ctx(business_config);

    match cli.command {
        Commands::Login { user, password } => {
            commands::run_login(ctx, &config_path, user, password).await
        }
        Commands::Logout => commands::run_logout(&config_path),
        Commands::List { filters, selects } => {
            let config = Config::load(&config_path)?;
            commands::run_list(ctx, &config, filters, selects).await
        }
        Commands::Export { output } => {
            let config = Config::load(&config_path)?;
            commands::run_export(ctx, &config, output).await.map(drop)
        }
        Commands::UploadPhoto { row, file, save } => {
            let config = Config::load(&config_path)?;
            commands::run_upload_photo(ctx, &config, row, &file, save)
                .await
                .map(drop)
        }
    }
}
