use crate::cli::GlobalArgs;
use crate::cli::context::Context;
use rally_championship_trait::ChampionshipError;
use rally_garage::{Result, WorkflowError};
use tracing::info;

pub async fn handle_register_command(global: &GlobalArgs, yes: bool) -> Result<()> {
    let context = Context::load(global)?;
    let championship = context.signing_championship(yes)?;
    let confirmations = context.config.championship.confirmation_blocks;

    let Some(driver) = championship.signer_address() else {
        return Err(ChampionshipError::WalletNotConnected.into());
    };
    if championship.is_registered(driver).await? {
        println!("✅ {} is already registered", driver);
        return Ok(());
    }

    println!("📝 Registering {}...", driver);
    let tx_hash = championship.register_driver().await?;
    println!("   Sent: {}", context.transaction_url(tx_hash));

    println!("⏳ Waiting for {} confirmations...", confirmations);
    let receipt = championship.await_confirmation(tx_hash, confirmations).await?;
    if !receipt.is_success() {
        return Err(WorkflowError::RegistrationReverted { tx_hash }.into());
    }

    info!("Driver {} registered in block {:?}", driver, receipt.block_number);
    println!("✅ Registered in block {}", receipt.block_number.unwrap_or_default());
    Ok(())
}
