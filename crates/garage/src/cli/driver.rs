use crate::cli::GlobalArgs;
use crate::cli::context::{Context, resolve_driver};
use rally_championship_trait::{Address, Championship};
use rally_garage::Result;
use tracing::debug;

pub async fn handle_status_command(global: &GlobalArgs, driver: Option<Address>) -> Result<()> {
    let context = Context::load(global)?;
    let championship = context.championship()?;
    let driver = resolve_driver(driver, &championship)?;

    let registered = championship.is_registered(driver).await?;
    if registered {
        println!("✅ {} is registered", driver);
    } else {
        println!("❌ {} is not registered (run `rally register`)", driver);
    }
    Ok(())
}

pub async fn handle_profile_command(global: &GlobalArgs, driver: Option<Address>) -> Result<()> {
    let context = Context::load(global)?;
    let championship = context.championship()?;
    let driver = resolve_driver(driver, &championship)?;

    let profile = championship.get_driver_profile(driver).await?;
    debug!("Profile for {}: {:?}", driver, profile);

    println!("👤 Driver: {}", driver);
    if !profile.is_registered() {
        println!("   Not registered");
        return Ok(());
    }
    println!("   Tier:       {}", profile.tier);
    println!("   Joined at:  {}", profile.joined_at);
    if profile.has_setup() {
        println!("   Car:        {}", profile.car_model);
        println!("   Setup from: {}", profile.car_setup_updated_at);
    } else {
        println!("   No car setup submitted yet");
    }
    Ok(())
}

pub async fn handle_drivers_command(global: &GlobalArgs) -> Result<()> {
    let context = Context::load(global)?;
    let championship = context.championship()?;

    let total = championship.total_drivers().await?;
    println!("🏁 {} registered drivers", total);
    Ok(())
}

pub async fn handle_events_command(
    global: &GlobalArgs,
    from_block: u64,
    driver: Option<Address>,
) -> Result<()> {
    let context = Context::load(global)?;
    let championship = context.championship()?;

    let events = championship
        .driver_registered_events(from_block, driver)
        .await?;

    if events.is_empty() {
        println!("No DriverRegistered events since block {}", from_block);
        return Ok(());
    }

    println!("📜 {} DriverRegistered events", events.len());
    for event in events {
        let block = event
            .block_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "pending".to_string());
        let tx = event
            .transaction_hash
            .map(|hash| context.transaction_url(hash))
            .unwrap_or_default();
        println!("   block {:<10} {} ({}) {}", block, event.driver, event.tier, tx);
    }
    Ok(())
}
