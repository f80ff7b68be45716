use clap::{Args, Parser, Subcommand};
use rally_catalog::PartCategory;
use rally_championship_trait::Address;
use std::path::PathBuf;

pub mod catalog;
pub mod context;
pub mod driver;
pub mod register;
pub mod submit;

#[derive(Parser)]
#[command(name = "rally")]
#[command(about = "EncryptedRally garage: tune a car and submit an encrypted setup", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "RALLY_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "RALLY_RPC_URL")]
    pub rpc_url: Option<String>,

    #[arg(long, global = true, env = "RALLY_CHAIN_ID")]
    pub chain_id: Option<u64>,

    #[arg(long, global = true, env = "RALLY_CONTRACT_ADDRESS")]
    pub contract_address: Option<String>,

    /// Driver wallet private key (0x-prefixed hex); required for register and submit
    #[arg(long, global = true, env = "RALLY_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    #[arg(long, global = true, env = "RALLY_FHE_BRIDGE_URL")]
    pub fhe_bridge_url: Option<String>,

    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the cars in the garage
    Cars,

    /// List performance parts
    Parts {
        /// Only show one category (engine, transmission, suspension, wheels, body, exhaust)
        #[arg(long)]
        category: Option<PartCategory>,
    },

    /// Show whether a driver is registered
    Status {
        /// Driver address (defaults to the connected wallet)
        #[arg(long)]
        driver: Option<Address>,
    },

    /// Show a driver's championship profile
    Profile {
        /// Driver address (defaults to the connected wallet)
        #[arg(long)]
        driver: Option<Address>,
    },

    /// Show the number of registered drivers
    Drivers,

    /// List DriverRegistered events
    Events {
        #[arg(long, default_value = "0")]
        from_block: u64,

        /// Only show registrations of this driver
        #[arg(long)]
        driver: Option<Address>,
    },

    /// Register the connected wallet as a driver
    Register {
        /// Sign without asking for confirmation
        #[arg(long, short = 'y', default_value = "false")]
        yes: bool,
    },

    /// Encrypt and submit a car setup
    Submit {
        /// Car id (see `rally cars`)
        #[arg(long)]
        car: String,

        /// Part id, repeat for several parts (see `rally parts`)
        #[arg(long = "part", required = true)]
        parts: Vec<String>,

        /// Sign without asking for confirmation
        #[arg(long, short = 'y', default_value = "false")]
        yes: bool,
    },
}
