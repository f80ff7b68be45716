use crate::cli::GlobalArgs;
use rally_championship_ethereum::EthereumChampionship;
use rally_championship_trait::{Address, Championship};
use rally_fhe::{EncryptionGateway, HttpSdkLoader};
use rally_garage::{
    AutoApprove, ConfigOverrides, GarageConfig, GarageError, Result, SigningPrompt,
    TerminalApprover,
};
use std::sync::Arc;
use tracing_subscriber::prelude::*;

/// Initialize logging once; `RUST_LOG` takes precedence over `--log-level`
pub fn init_logging(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Resolved configuration plus constructors for the backends it describes
pub struct Context {
    pub config: GarageConfig,
}

impl Context {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let overrides = ConfigOverrides {
            rpc_url: global.rpc_url.clone(),
            chain_id: global.chain_id,
            contract_address: global.contract_address.clone(),
            private_key: global.private_key.clone(),
            fhe_bridge_url: global.fhe_bridge_url.clone(),
        };
        let config = GarageConfig::load(global.config.as_deref(), overrides)?;
        Ok(Self { config })
    }

    pub fn championship(&self) -> Result<EthereumChampionship> {
        Ok(EthereumChampionship::new(self.config.championship.clone())?)
    }

    /// Championship client that asks before signing unless `yes` is set
    pub fn signing_championship(&self, yes: bool) -> Result<Arc<dyn Championship>> {
        let inner: Arc<dyn Championship> = Arc::new(self.championship()?);
        if inner.signer_address().is_none() {
            return Err(GarageError::Config(
                "a private key is required (--private-key or RALLY_PRIVATE_KEY)".to_string(),
            ));
        }
        Ok(if yes {
            Arc::new(SigningPrompt::new(inner, Arc::new(AutoApprove)))
        } else {
            Arc::new(SigningPrompt::new(inner, Arc::new(TerminalApprover)))
        })
    }

    pub fn gateway(&self) -> Result<Arc<EncryptionGateway>> {
        let loader = HttpSdkLoader::new(&self.config.fhe)?;
        Ok(Arc::new(EncryptionGateway::new(
            Arc::new(loader),
            self.config.network_binding(),
        )))
    }

    pub fn transaction_url(&self, tx_hash: impl std::fmt::Display) -> String {
        self.config
            .championship
            .transaction_url(&tx_hash)
            .unwrap_or_else(|| tx_hash.to_string())
    }
}

/// `driver`, or the connected wallet when omitted
pub fn resolve_driver(driver: Option<Address>, championship: &dyn Championship) -> Result<Address> {
    driver.or_else(|| championship.signer_address()).ok_or_else(|| {
        GarageError::InvalidAddress(
            "no --driver given and no wallet connected".to_string(),
        )
    })
}
