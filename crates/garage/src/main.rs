mod cli;

use clap::Parser;
use dotenvy::dotenv;

use crate::cli::context::init_logging;
use crate::cli::{Cli, Commands};
use rally_garage::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file from current directory
    dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.global.log_level);

    let global = &cli.global;
    match cli.command {
        Commands::Cars => cli::catalog::handle_cars_command(),
        Commands::Parts { category } => cli::catalog::handle_parts_command(category),
        Commands::Status { driver } => cli::driver::handle_status_command(global, driver).await,
        Commands::Profile { driver } => cli::driver::handle_profile_command(global, driver).await,
        Commands::Drivers => cli::driver::handle_drivers_command(global).await,
        Commands::Events { from_block, driver } => {
            cli::driver::handle_events_command(global, from_block, driver).await
        }
        Commands::Register { yes } => cli::register::handle_register_command(global, yes).await,
        Commands::Submit { car, parts, yes } => {
            cli::submit::handle_submit_command(global, &car, &parts, yes).await
        }
    }
}
