//! Setup submission workflow
//!
//! One submission is a linear sequence of awaited steps:
//!
//! ```text
//! Idle -> CheckingRegistration -> (RegisteringDriver ->) AggregatingBoosts
//!      -> Encrypting -> Submitting -> AwaitingConfirmation -> Succeeded | Failed
//! ```
//!
//! Every failure is terminal for the attempt and nothing is retried.
//! Progress is published as [`WorkflowEvent`]s to an optional subscriber.

use crate::error::{ValidationError, WorkflowError};
use rally_catalog::{Selection, StatTotals, aggregate, map_to_contract_parameters};
use rally_championship_trait::{
    Address, Championship, DEFAULT_CONFIRMATIONS, SetupParameters, TxHash, TxReceipt,
};
use rally_fhe::EncryptionGateway;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Buffer size of the event channel
const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    CheckingRegistration,
    RegisteringDriver,
    AggregatingBoosts,
    Encrypting,
    Submitting,
    AwaitingConfirmation,
    Succeeded,
    Failed,
}

impl WorkflowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::CheckingRegistration => "checking registration",
            Self::RegisteringDriver => "registering driver",
            Self::AggregatingBoosts => "aggregating boosts",
            Self::Encrypting => "encrypting",
            Self::Submitting => "submitting",
            Self::AwaitingConfirmation => "awaiting confirmation",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Discrete progress notification
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    StateChanged(WorkflowState),
    RegistrationChecked { driver: Address, registered: bool },
    RegistrationSubmitted { tx_hash: TxHash },
    RegistrationConfirmed { receipt: TxReceipt },
    BoostsAggregated { totals: StatTotals, parameters: SetupParameters },
    SetupEncrypted,
    SetupSubmitted { tx_hash: TxHash },
    Succeeded(SubmissionOutcome),
    Failed { error: String, tx_hash: Option<TxHash> },
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub driver: Address,
    pub car_model: String,
    pub parameters: SetupParameters,
    /// Set when the driver had to be registered first
    pub registration_tx: Option<TxHash>,
    pub receipt: TxReceipt,
}

impl SubmissionOutcome {
    pub fn tx_hash(&self) -> TxHash {
        self.receipt.transaction_hash
    }
}

/// Drives one or more setup submissions against a championship contract
pub struct SetupWorkflow {
    championship: Arc<dyn Championship>,
    gateway: Arc<EncryptionGateway>,
    confirmations: u64,
    events: Option<mpsc::Sender<WorkflowEvent>>,
    state: WorkflowState,
}

impl SetupWorkflow {
    pub fn new(championship: Arc<dyn Championship>, gateway: Arc<EncryptionGateway>) -> Self {
        Self {
            championship,
            gateway,
            confirmations: DEFAULT_CONFIRMATIONS,
            events: None,
            state: WorkflowState::Idle,
        }
    }

    /// Confirmations required for both the registration and the setup transaction
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// Open the event channel; replaces any previous subscriber.
    ///
    /// Events are published without waiting, so once `EVENT_BUFFER` events
    /// are unread further ones are dropped.
    pub fn subscribe(&mut self) -> mpsc::Receiver<WorkflowEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        self.events = Some(tx);
        rx
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Run a full submission for `selection`.
    ///
    /// Validation failures return before any event is emitted and leave the
    /// workflow idle.
    pub async fn submit(
        &mut self,
        selection: &Selection,
    ) -> Result<SubmissionOutcome, WorkflowError> {
        self.state = WorkflowState::Idle;
        if selection.is_empty() {
            return Err(ValidationError::NoPartsSelected.into());
        }
        let driver = self
            .championship
            .signer_address()
            .ok_or(ValidationError::WalletNotConnected)?;

        let car_model = selection.car().label();
        info!(
            "Submitting setup for {} with {} parts as {}",
            car_model,
            selection.len(),
            driver
        );

        match self.run(selection, driver, car_model).await {
            Ok(outcome) => {
                self.transition(WorkflowState::Succeeded);
                info!("Car setup confirmed in tx {}", outcome.tx_hash());
                self.emit(WorkflowEvent::Succeeded(outcome.clone()));
                Ok(outcome)
            }
            Err(err) => {
                error!("Setup submission failed during {}: {}", self.state, err);
                self.transition(WorkflowState::Failed);
                self.emit(WorkflowEvent::Failed {
                    error: err.to_string(),
                    tx_hash: err.reverted_tx_hash(),
                });
                Err(err)
            }
        }
    }

    async fn run(
        &mut self,
        selection: &Selection,
        driver: Address,
        car_model: String,
    ) -> Result<SubmissionOutcome, WorkflowError> {
        self.transition(WorkflowState::CheckingRegistration);
        let registered = self.championship.is_registered(driver).await?;
        self.emit(WorkflowEvent::RegistrationChecked { driver, registered });

        let registration_tx = if registered {
            debug!("Driver {} already registered", driver);
            None
        } else {
            Some(self.register().await?)
        };

        self.transition(WorkflowState::AggregatingBoosts);
        let totals = aggregate(selection.parts());
        let parameters = map_to_contract_parameters(selection);
        debug!("Setup parameters: {:?}", parameters);
        self.emit(WorkflowEvent::BoostsAggregated { totals, parameters });

        self.transition(WorkflowState::Encrypting);
        let contract = self.championship.contract_address().to_checksum(None);
        let encrypted = self
            .gateway
            .encrypt_setup(&parameters, &contract, driver)
            .await?;
        self.emit(WorkflowEvent::SetupEncrypted);

        self.transition(WorkflowState::Submitting);
        let tx_hash = self
            .championship
            .submit_car_setup(&car_model, &encrypted)
            .await?;
        self.emit(WorkflowEvent::SetupSubmitted { tx_hash });

        self.transition(WorkflowState::AwaitingConfirmation);
        let receipt = self
            .championship
            .await_confirmation(tx_hash, self.confirmations)
            .await?;
        if !receipt.is_success() {
            return Err(WorkflowError::TransactionReverted { tx_hash });
        }

        Ok(SubmissionOutcome {
            driver,
            car_model,
            parameters,
            registration_tx,
            receipt,
        })
    }

    async fn register(&mut self) -> Result<TxHash, WorkflowError> {
        self.transition(WorkflowState::RegisteringDriver);

        let tx_hash = self.championship.register_driver().await?;
        self.emit(WorkflowEvent::RegistrationSubmitted { tx_hash });

        let receipt = self
            .championship
            .await_confirmation(tx_hash, self.confirmations)
            .await?;
        if !receipt.is_success() {
            return Err(WorkflowError::RegistrationReverted { tx_hash });
        }

        info!("Driver registered in tx {}", tx_hash);
        self.emit(WorkflowEvent::RegistrationConfirmed { receipt });
        Ok(tx_hash)
    }

    fn transition(&mut self, state: WorkflowState) {
        debug!("Workflow {} -> {}", self.state, state);
        self.state = state;
        self.emit(WorkflowEvent::StateChanged(state));
    }

    /// Publish without waiting; a full or closed channel only loses notifications
    fn emit(&self, event: WorkflowEvent) {
        let Some(events) = &self.events else {
            return;
        };
        match events.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!("Event subscriber is lagging, dropping {:?}", event);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(WorkflowState::Succeeded.is_terminal());
        assert!(WorkflowState::Failed.is_terminal());
        assert!(!WorkflowState::AwaitingConfirmation.is_terminal());
        assert_eq!(WorkflowState::CheckingRegistration.to_string(), "checking registration");
    }
}
