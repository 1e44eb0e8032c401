use anyhow::Context;
use clap::Parser;

use shortgate::cli::{Cli, Commands};
use shortgate::config::{StaticConfig, init_config};
use shortgate::runtime::run_server;
use shortgate::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(Commands::GenerateConfig { output }) = cli.command {
        match output {
            Some(path) => {
                StaticConfig::default()
                    .save_to_file(&path)
                    .with_context(|| format!("Failed to write {}", path))?;
                println!("Sample configuration written to {}", path);
            }
            None => print!("{}", StaticConfig::generate_sample_config()?),
        }
        return Ok(());
    }

    let config = init_config(cli.config.as_deref()).context("Invalid configuration")?;
    let _guard = init_logging(&config.logging)?;

    run_server(config).await
}
