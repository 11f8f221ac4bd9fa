// Contracts Module - Public ABIs Only

pub mod bond_ledger;
pub mod energy_stake;
pub mod erc20;
pub mod reward_pool;

// Public exports
pub use bond_ledger::IBondLedger;
pub use energy_stake::IEnergyStake;
pub use erc20::Erc20;
pub use reward_pool::IRewardPool;
