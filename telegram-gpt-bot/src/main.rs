//! Binary entry point: parse the CLI and run the bot.

use anyhow::Result;
use clap::Parser;
use telegram_gpt_bot::{run, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => run(token).await,
    }
}
