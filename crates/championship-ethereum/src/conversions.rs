//! Conversions from alloy RPC types into championship domain types

use crate::abi::EncryptedRallyChampionship::{DriverRegistered, getDriverProfileReturn};
use alloy::network::ReceiptResponse;
use alloy::primitives::U256;
use alloy::rpc::types::{Log, TransactionReceipt};
use alloy::sol_types::SolEvent;
use rally_championship_trait::{
    ChampionshipError, ChampionshipResult, DriverProfile, DriverRegisteredEvent, DriverTier,
    ReceiptStatus, TxReceipt,
};

/// Convert Solidity timestamp (U256) to u64
/// Safely handles overflow by capping at u64::MAX
pub fn timestamp_to_u64(timestamp: U256) -> u64 {
    if timestamp > U256::from(u64::MAX) {
        u64::MAX
    } else {
        timestamp.to::<u64>()
    }
}

pub fn receipt_from_rpc(receipt: &TransactionReceipt) -> TxReceipt {
    TxReceipt {
        transaction_hash: receipt.transaction_hash(),
        block_number: receipt.block_number(),
        gas_used: receipt.gas_used(),
        status: ReceiptStatus::from(receipt.status()),
    }
}

pub fn profile_from_return(ret: getDriverProfileReturn) -> DriverProfile {
    DriverProfile {
        car_model: ret.carModel,
        tier: DriverTier::from(ret.tier),
        joined_at: timestamp_to_u64(ret.joinedAt),
        car_setup_updated_at: timestamp_to_u64(ret.carSetupUpdatedAt),
    }
}

/// Decode a `DriverRegistered` log
pub fn driver_registered_from_log(log: &Log) -> ChampionshipResult<DriverRegisteredEvent> {
    let decoded = DriverRegistered::decode_log_data(&log.inner.data).map_err(|e| {
        ChampionshipError::rpc(format!("Failed to decode DriverRegistered event: {}", e))
    })?;

    Ok(DriverRegisteredEvent {
        driver: decoded.driver,
        tier: DriverTier::from(decoded.tier),
        block_number: log.block_number,
        transaction_hash: log.transaction_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, LogData, TxHash};

    #[test]
    fn test_timestamp_to_u64() {
        assert_eq!(timestamp_to_u64(U256::from(1_700_000_000u64)), 1_700_000_000);
        assert_eq!(timestamp_to_u64(U256::MAX), u64::MAX);
    }

    #[test]
    fn test_profile_from_return() {
        let profile = profile_from_return(getDriverProfileReturn {
            carModel: "Porsche 911 GT3 RS".to_string(),
            tier: 0,
            joinedAt: U256::from(1_700_000_000u64),
            carSetupUpdatedAt: U256::ZERO,
        });

        assert!(profile.is_registered());
        assert!(!profile.has_setup());
        assert_eq!(profile.tier, DriverTier::Rookie);
        assert_eq!(profile.car_model, "Porsche 911 GT3 RS");
    }

    #[test]
    fn test_driver_registered_from_log() {
        let driver = Address::repeat_byte(0x11);
        let event = DriverRegistered { driver, tier: 0 };
        let data: LogData = event.encode_log_data();

        let log = Log {
            inner: alloy::primitives::Log {
                address: Address::repeat_byte(0x42),
                data,
            },
            block_number: Some(7),
            transaction_hash: Some(TxHash::repeat_byte(0xcd)),
            ..Default::default()
        };

        let decoded = driver_registered_from_log(&log).unwrap();
        assert_eq!(decoded.driver, driver);
        assert_eq!(decoded.tier, DriverTier::Rookie);
        assert_eq!(decoded.block_number, Some(7));
        assert_eq!(decoded.transaction_hash, Some(TxHash::repeat_byte(0xcd)));
    }
}
