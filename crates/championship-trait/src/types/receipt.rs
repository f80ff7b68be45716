//! Transaction receipt types

use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution status of a mined transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
    Success,
    Failed,
}

impl From<bool> for ReceiptStatus {
    fn from(success: bool) -> Self {
        if success { Self::Success } else { Self::Failed }
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Receipt of a confirmed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub status: ReceiptStatus,
}

impl TxReceipt {
    pub fn is_success(&self) -> bool {
        self.status == ReceiptStatus::Success
    }
}
