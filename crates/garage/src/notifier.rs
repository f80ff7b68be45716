//! Subscriber task that turns workflow events into log lines and user notifications

use crate::workflow::{WorkflowEvent, WorkflowState};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Human-readable notification for `event`, `None` for events that are only logged
pub fn describe(event: &WorkflowEvent, explorer_url: Option<&str>) -> Option<String> {
    let link = |hash: &dyn std::fmt::Display| match explorer_url {
        Some(explorer) => format!("{}/tx/{}", explorer.trim_end_matches('/'), hash),
        None => hash.to_string(),
    };

    match event {
        WorkflowEvent::StateChanged(state) => match state {
            WorkflowState::CheckingRegistration => Some("🔍 Checking driver registration...".to_string()),
            WorkflowState::RegisteringDriver => Some("📝 Registering driver, confirm in your wallet...".to_string()),
            WorkflowState::Encrypting => Some("🔐 Encrypting car setup...".to_string()),
            WorkflowState::Submitting => Some("📤 Submitting encrypted setup, confirm in your wallet...".to_string()),
            WorkflowState::AwaitingConfirmation => Some("⏳ Waiting for confirmations...".to_string()),
            _ => None,
        },
        WorkflowEvent::RegistrationChecked { registered: false, .. } => {
            Some("   Driver not registered yet".to_string())
        }
        WorkflowEvent::RegistrationChecked { .. } => None,
        WorkflowEvent::RegistrationSubmitted { tx_hash } => {
            Some(format!("   Registration sent: {}", link(tx_hash)))
        }
        WorkflowEvent::RegistrationConfirmed { .. } => Some("✅ Driver registered".to_string()),
        WorkflowEvent::BoostsAggregated { totals, .. } => Some(format!(
            "⚙️  Boosts: speed +{} acceleration +{} handling +{} durability +{}",
            totals.speed, totals.acceleration, totals.handling, totals.durability
        )),
        WorkflowEvent::SetupEncrypted => None,
        WorkflowEvent::SetupSubmitted { tx_hash } => {
            Some(format!("   Setup sent: {}", link(tx_hash)))
        }
        WorkflowEvent::Succeeded(outcome) => Some(format!(
            "🏁 Car setup for {} confirmed: {}",
            outcome.car_model,
            link(&outcome.tx_hash())
        )),
        WorkflowEvent::Failed { error, tx_hash } => Some(match tx_hash {
            Some(hash) => format!("❌ {} ({})", error, link(hash)),
            None => format!("❌ {}", error),
        }),
    }
}

/// Spawn the notifier; it ends when the workflow drops its sender
pub fn spawn_notifier(
    mut events: mpsc::Receiver<WorkflowEvent>,
    explorer_url: Option<String>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match &event {
                WorkflowEvent::StateChanged(state) => info!("Workflow state: {}", state),
                WorkflowEvent::Failed { error, .. } => warn!("Workflow failed: {}", error),
                other => info!("Workflow event: {:?}", other),
            }
            if let Some(message) = describe(&event, explorer_url.as_deref()) {
                println!("{}", message);
            }
        }
    })
}
