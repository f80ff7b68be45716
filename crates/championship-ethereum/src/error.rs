//! Classification of alloy failures into championship errors

use crate::abi::EncryptedRallyChampionship::{DriverAlreadyRegistered, DriverNotRegistered};
use alloy::contract::Error as ContractError;
use alloy::primitives::TxHash;
use alloy::providers::{PendingTransactionError, WatchTxError};
use alloy::transports::{RpcError, TransportErrorKind};
use rally_championship_trait::ChampionshipError;

/// EIP-1193 "user rejected request" code
pub const USER_REJECTED_CODE: i64 = 4001;

/// Check whether an RPC error payload describes the signer declining a request
pub fn is_user_rejection(code: i64, message: &str) -> bool {
    if code == USER_REJECTED_CODE {
        return true;
    }
    let message = message.to_ascii_lowercase();
    message.contains("user rejected") || message.contains("user denied")
}

/// Classify a transport-level failure
pub fn from_transport_error(err: RpcError<TransportErrorKind>) -> ChampionshipError {
    if let Some(payload) = err.as_error_resp() {
        if is_user_rejection(payload.code, &payload.message) {
            return ChampionshipError::WalletRejected(payload.message.to_string());
        }
        if payload.message.to_ascii_lowercase().contains("execution reverted") {
            return ChampionshipError::Reverted(payload.message.to_string());
        }
    }
    ChampionshipError::Rpc(err.to_string())
}

/// Classify a failure raised by a contract `call()` or `send()`
pub fn from_contract_error(err: ContractError) -> ChampionshipError {
    if err.as_decoded_error::<DriverAlreadyRegistered>().is_some() {
        return ChampionshipError::DriverAlreadyRegistered;
    }
    if err.as_decoded_error::<DriverNotRegistered>().is_some() {
        return ChampionshipError::DriverNotRegistered;
    }
    if let Some(data) = err.as_revert_data() {
        return ChampionshipError::Reverted(format!("revert data {}", data));
    }

    match err {
        ContractError::TransportError(e) => from_transport_error(e),
        ContractError::PendingTransactionError(e) => {
            ChampionshipError::Rpc(format!("pending transaction: {}", e))
        }
        other => ChampionshipError::Rpc(other.to_string()),
    }
}

/// Classify a failure while waiting for a transaction receipt
pub fn from_pending_error(tx_hash: TxHash, err: PendingTransactionError) -> ChampionshipError {
    match err {
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
            ChampionshipError::TransactionTimeout {
                tx_hash,
                message: "timed out waiting for confirmations".to_string(),
            }
        }
        PendingTransactionError::TransportError(e) => from_transport_error(e),
        other => ChampionshipError::Rpc(other.to_string()),
    }
}
