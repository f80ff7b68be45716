use crate::cli::GlobalArgs;
use crate::cli::context::Context;
use rally_catalog::{Selection, find_car, find_part};
use rally_garage::{Result, SetupWorkflow, spawn_notifier};
use tracing::debug;

pub async fn handle_submit_command(
    global: &GlobalArgs,
    car: &str,
    parts: &[String],
    yes: bool,
) -> Result<()> {
    let mut selection = Selection::new(find_car(car)?);
    for id in parts {
        if let Some(replaced) = selection.add_part(find_part(id)?) {
            println!("⚠️  {} replaces {} ({})", id, replaced.id, replaced.category);
        }
    }
    debug!("Selection: {:?}", selection);

    println!("🏎️  {}", selection.car().label());
    for part in selection.parts() {
        println!("   {:<14} {}", part.category.to_string(), part.name);
    }
    println!("   Total price: {:.2} ETH", selection.total_price());
    println!();

    let context = Context::load(global)?;
    let championship = context.signing_championship(yes)?;
    let gateway = context.gateway()?;

    let mut workflow = SetupWorkflow::new(championship, gateway)
        .with_confirmations(context.config.championship.confirmation_blocks);
    let notifier = spawn_notifier(
        workflow.subscribe(),
        context.config.championship.explorer_url.clone(),
    );

    let result = workflow.submit(&selection).await;

    // Closing the channel lets the notifier print the final event and exit
    drop(workflow);
    notifier.await.ok();

    result?;
    Ok(())
}
