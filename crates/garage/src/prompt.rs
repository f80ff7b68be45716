//! Signing prompt in front of a championship backend
//!
//! [`SigningPrompt`] wraps any [`Championship`] and asks an [`Approver`] before
//! each state-changing call. A declined request surfaces as
//! [`ChampionshipError::WalletRejected`], the same error a browser wallet
//! produces when the user dismisses the signature popup.

use async_trait::async_trait;
use rally_championship_trait::*;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};

/// A state-changing call awaiting approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningRequest {
    RegisterDriver { driver: Address },
    SubmitCarSetup { driver: Address, car_model: String },
}

impl std::fmt::Display for SigningRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RegisterDriver { driver } => write!(f, "registerDriver() from {}", driver),
            Self::SubmitCarSetup { driver, car_model } => {
                write!(f, "updateCarSetup(\"{}\", ...) from {}", car_model, driver)
            }
        }
    }
}

#[async_trait]
pub trait Approver: Send + Sync {
    async fn approve(&self, request: &SigningRequest) -> anyhow::Result<bool>;
}

/// Approves every request (`--yes`)
pub struct AutoApprove;

#[async_trait]
impl Approver for AutoApprove {
    async fn approve(&self, _request: &SigningRequest) -> anyhow::Result<bool> {
        Ok(true)
    }
}

/// Asks on the terminal
pub struct TerminalApprover;

#[async_trait]
impl Approver for TerminalApprover {
    async fn approve(&self, request: &SigningRequest) -> anyhow::Result<bool> {
        let prompt = format!("✍️  Sign {}? [y/N] ", request);
        let answer = tokio::task::spawn_blocking(move || -> std::io::Result<String> {
            let mut stdout = std::io::stdout();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await??;

        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

/// Championship decorator that requests approval before signing
pub struct SigningPrompt {
    inner: Arc<dyn Championship>,
    approver: Arc<dyn Approver>,
}

impl SigningPrompt {
    pub fn new(inner: Arc<dyn Championship>, approver: Arc<dyn Approver>) -> Self {
        Self { inner, approver }
    }

    async fn require_approval(&self, request: SigningRequest) -> ChampionshipResult<()> {
        let approved = self
            .approver
            .approve(&request)
            .await
            .map_err(|e| ChampionshipError::wallet_rejected(format!("signing prompt failed: {}", e)))?;

        if approved {
            info!("Approved {}", request);
            Ok(())
        } else {
            warn!("Declined {}", request);
            Err(ChampionshipError::wallet_rejected("User rejected the signing request"))
        }
    }
}

#[async_trait]
impl Championship for SigningPrompt {
    fn chain_id(&self) -> u64 {
        self.inner.chain_id()
    }

    fn contract_address(&self) -> Address {
        self.inner.contract_address()
    }

    fn signer_address(&self) -> Option<Address> {
        self.inner.signer_address()
    }

    async fn is_registered(&self, driver: Address) -> ChampionshipResult<bool> {
        self.inner.is_registered(driver).await
    }

    async fn get_driver_profile(&self, driver: Address) -> ChampionshipResult<DriverProfile> {
        self.inner.get_driver_profile(driver).await
    }

    async fn total_drivers(&self) -> ChampionshipResult<u64> {
        self.inner.total_drivers().await
    }

    async fn driver_registered_events(
        &self,
        from_block: u64,
        driver: Option<Address>,
    ) -> ChampionshipResult<Vec<DriverRegisteredEvent>> {
        self.inner.driver_registered_events(from_block, driver).await
    }

    async fn register_driver(&self) -> ChampionshipResult<TxHash> {
        let driver = self
            .signer_address()
            .ok_or(ChampionshipError::WalletNotConnected)?;
        self.require_approval(SigningRequest::RegisterDriver { driver })
            .await?;
        self.inner.register_driver().await
    }

    async fn submit_car_setup(
        &self,
        car_model: &str,
        setup: &EncryptedCarSetup,
    ) -> ChampionshipResult<TxHash> {
        let driver = self
            .signer_address()
            .ok_or(ChampionshipError::WalletNotConnected)?;
        self.require_approval(SigningRequest::SubmitCarSetup {
            driver,
            car_model: car_model.to_string(),
        })
        .await?;
        self.inner.submit_car_setup(car_model, setup).await
    }

    async fn await_confirmation(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> ChampionshipResult<TxReceipt> {
        self.inner.await_confirmation(tx_hash, confirmations).await
    }
}
