//! EncryptedRallyChampionship contract bindings
//!
//! Only the functions, events and errors the client consumes are declared.
//! `externalEuint16` / `externalEuint8` handles are `bytes32` on the ABI level.

use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    contract EncryptedRallyChampionship {
        event DriverRegistered(address indexed driver, uint8 tier);

        error DriverAlreadyRegistered();
        error DriverNotRegistered();

        function registerDriver() external;

        function updateCarSetup(
            string carModel,
            bytes32 engineTuningInput,
            bytes32 suspensionBalanceInput,
            bytes32 aeroPackageInput,
            bytes32 tireCompoundInput,
            bytes32 boostResponseInput,
            bytes32 brakeBiasInput,
            bytes32 tractionControlInput,
            bytes inputProof
        ) external;

        function isRegistered(address driver) external view returns (bool);

        function getDriverProfile(address driver)
            external
            view
            returns (string carModel, uint8 tier, uint256 joinedAt, uint256 carSetupUpdatedAt);

        function totalDrivers() external view returns (uint256);
    }
}
