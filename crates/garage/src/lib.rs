//! EncryptedRally garage
//!
//! Ties the catalog, the encryption gateway and the championship contract
//! together: [`SetupWorkflow`] registers the driver when needed, encrypts the
//! aggregated setup and submits it, publishing progress to the [`notifier`].

pub mod config;
pub mod error;
pub mod notifier;
pub mod prompt;
pub mod workflow;

pub use config::{ConfigOverrides, GarageConfig};
pub use error::{GarageError, Result, ValidationError, WorkflowError};
pub use notifier::spawn_notifier;
pub use prompt::{Approver, AutoApprove, SigningPrompt, SigningRequest, TerminalApprover};
pub use workflow::{SetupWorkflow, SubmissionOutcome, WorkflowEvent, WorkflowState};
