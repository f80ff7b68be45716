//! Integration tests for the Ethereum championship client
//!
//! Tests marked `#[ignore]` need a node with the championship contract deployed:
//! 1. `RALLY_TEST_RPC_URL` pointing at the node (default `http://localhost:8545`)
//! 2. `RALLY_TEST_CONTRACT_ADDRESS` set to the deployed contract
//! 3. `RALLY_TEST_PRIVATE_KEY` for the write tests (defaults to the first anvil account)
//!
//! Run them with `cargo test -p rally-championship-ethereum -- --ignored`.

use rally_championship_ethereum::{
    EthereumChampionship, EthereumChampionshipConfig, SEPOLIA_CHAIN_ID, SEPOLIA_CONTRACT_ADDRESS,
};
use rally_championship_trait::*;

const ANVIL_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Build a config for a local node from the environment
fn load_test_config() -> EthereumChampionshipConfig {
    let rpc_url =
        std::env::var("RALLY_TEST_RPC_URL").unwrap_or_else(|_| "http://localhost:8545".to_string());
    let contract_address = std::env::var("RALLY_TEST_CONTRACT_ADDRESS")
        .expect("RALLY_TEST_CONTRACT_ADDRESS must be set for network tests");
    let private_key =
        std::env::var("RALLY_TEST_PRIVATE_KEY").unwrap_or_else(|_| ANVIL_PRIVATE_KEY.to_string());

    EthereumChampionshipConfig {
        rpc_url,
        chain_id: 31337,
        contract_address,
        private_key: Some(private_key),
        confirmation_blocks: 1,
        confirmation_timeout_secs: Some(60),
        explorer_url: None,
    }
}

// =============================================================================
// CONFIGURATION (no network)
// =============================================================================

#[test]
fn test_default_config_targets_sepolia_deployment() {
    let config = EthereumChampionshipConfig::default();
    assert_eq!(config.chain_id, SEPOLIA_CHAIN_ID);
    assert_eq!(config.contract_address, SEPOLIA_CONTRACT_ADDRESS);
    assert!(!config.can_write());

    let championship = EthereumChampionship::new(config).unwrap();
    assert_eq!(
        championship.contract_address().to_checksum(None),
        SEPOLIA_CONTRACT_ADDRESS
    );
    assert!(championship.signer_address().is_none());
}

#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("rally-config-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        format!(
            r#"
rpc_url = "http://127.0.0.1:8545"
chain_id = 31337
contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
private_key = "{}"
confirmation_blocks = 3
confirmation_timeout_secs = 45
"#,
            ANVIL_PRIVATE_KEY
        ),
    )
    .unwrap();

    let config = EthereumChampionshipConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(config.can_write());
    assert_eq!(config.confirmation_blocks, 3);
    assert_eq!(config.confirmation_timeout_secs, Some(45));

    let championship = EthereumChampionship::new(config).unwrap();
    assert_eq!(
        championship.signer_address().unwrap().to_checksum(None),
        "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
    );
}

#[test]
fn test_config_from_missing_file() {
    assert!(EthereumChampionshipConfig::from_file("/nonexistent/rally.toml").is_err());
}

#[test]
fn test_transaction_url_uses_explorer() {
    let championship = EthereumChampionship::new(EthereumChampionshipConfig::default()).unwrap();
    let url = championship.transaction_url(TxHash::ZERO).unwrap();
    assert!(url.starts_with("https://sepolia.etherscan.io/tx/0x"));
    assert!(url.ends_with(&"0".repeat(64)));
}

#[tokio::test]
async fn test_unreachable_rpc_is_network_error() {
    let config = EthereumChampionshipConfig {
        rpc_url: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    };
    let championship = EthereumChampionship::new(config).unwrap();

    let err = championship
        .is_registered(Address::repeat_byte(0x11))
        .await
        .unwrap_err();
    assert!(err.is_network_error(), "unexpected error: {err:?}");
}

// =============================================================================
// LIVE NODE
// =============================================================================

#[tokio::test]
#[ignore]
async fn test_register_and_read_profile() {
    let championship = EthereumChampionship::new(load_test_config()).unwrap();
    let driver = championship.signer_address().unwrap();

    if !championship.is_registered(driver).await.unwrap() {
        let tx_hash = championship.register_driver().await.unwrap();
        let receipt = championship.await_confirmation(tx_hash, 1).await.unwrap();
        assert!(receipt.is_success());
        assert_eq!(receipt.transaction_hash, tx_hash);
    }

    assert!(championship.is_registered(driver).await.unwrap());

    let profile = championship.get_driver_profile(driver).await.unwrap();
    assert!(profile.is_registered());
    assert!(championship.total_drivers().await.unwrap() >= 1);

    let events = championship
        .driver_registered_events(0, Some(driver))
        .await
        .unwrap();
    assert!(events.iter().any(|e| e.driver == driver));
}

#[tokio::test]
#[ignore]
async fn test_register_twice_reverts() {
    let championship = EthereumChampionship::new(load_test_config()).unwrap();
    let driver = championship.signer_address().unwrap();

    if !championship.is_registered(driver).await.unwrap() {
        let tx_hash = championship.register_driver().await.unwrap();
        championship.await_confirmation(tx_hash, 1).await.unwrap();
    }

    let err = championship.register_driver().await.unwrap_err();
    assert!(err.is_revert(), "unexpected error: {err:?}");
}

#[tokio::test]
#[ignore]
async fn test_unregistered_profile_is_empty() {
    let championship = EthereumChampionship::new(load_test_config()).unwrap();

    let profile = championship
        .get_driver_profile(Address::repeat_byte(0xee))
        .await
        .unwrap();
    assert_eq!(profile, DriverProfile::default());
}
