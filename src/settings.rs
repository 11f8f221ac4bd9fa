use config::{Config, ConfigError, File};
use ethers::types::Address;
use serde::Deserialize;
use std::env;

use crate::errors::SdkError;

#[derive(Debug, Deserialize, Clone)]
pub struct Rpc {
    #[serde(default = "default_rpc_url")]
    pub url: String,
}

fn default_rpc_url() -> String {
    "https://polygon-rpc.com".to_string()
}

impl Default for Rpc {
    fn default() -> Self {
        Self { url: default_rpc_url() }
    }
}

/// Contract addresses consumed by the engine, as configured strings.
/// Validation happens in [`Settings::contract_set`].
#[derive(Debug, Deserialize, Clone)]
pub struct Contracts {
    #[serde(default = "default_multicall3")]
    pub multicall3: String,
    #[serde(default = "default_lgns_token")]
    pub lgns_token: String,
    #[serde(default = "default_slgns_token")]
    pub slgns_token: String,
    #[serde(default = "default_turbine_token")]
    pub turbine_token: String,
    #[serde(default = "default_reward_pool")]
    pub reward_pool: String,
    #[serde(default = "default_staking_query")]
    pub staking_query: String,
    #[serde(default = "default_energy_stake_contracts")]
    pub energy_stake: Vec<String>,
    #[serde(default = "default_bond_contracts")]
    pub bonds: Vec<String>,
}

fn default_multicall3() -> String {
    // Canonical Multicall3 deployment, same address on every major chain.
    "0xcA11bde05977b3631167028862bE2a173976CA11".to_string()
}
fn default_lgns_token() -> String {
    "0xeb51d9a39ad5eef215dc0bf39a8821ff804a0f01".to_string()
}
fn default_slgns_token() -> String {
    "0x88f2712946d6be95fb7bbecfecf86a2d38aaf2ce".to_string()
}
fn default_turbine_token() -> String {
    "0x3a2b66a9aa36d1cd01373fda59cb2ce2ab6d0f1c".to_string()
}
fn default_reward_pool() -> String {
    "0x9c34b4777053965ba7f6e43fbe26e9ae5e95a99b".to_string()
}
fn default_staking_query() -> String {
    "0x0f1dfef0ce7c7b51a0f6bdc8c1f27d2c95a0dea4".to_string()
}
fn default_energy_stake_contracts() -> Vec<String> {
    vec![
        "0x4d3c3b7f871a8ce09a156e9ac9c5557a4c9a1d62".to_string(),
        "0x7e58f5bd7bd14a66ab7a1297c2e4531a0b08e9f3".to_string(),
    ]
}
fn default_bond_contracts() -> Vec<String> {
    vec![
        "0x2d7d9c4ef3b2a9f785e20cbace41816cd6e8e1e7".to_string(),
        "0x6ac917b9a2f9dae438ebd19e26a1a517cf142e84".to_string(),
        "0x8f0d5aa60cb2ed1af2901e8a5d105ce2e6ab9b61".to_string(),
    ]
}

impl Default for Contracts {
    fn default() -> Self {
        Self {
            multicall3: default_multicall3(),
            lgns_token: default_lgns_token(),
            slgns_token: default_slgns_token(),
            turbine_token: default_turbine_token(),
            reward_pool: default_reward_pool(),
            staking_query: default_staking_query(),
            energy_stake: default_energy_stake_contracts(),
            bonds: default_bond_contracts(),
        }
    }
}

/// Parsed, typed view of [`Contracts`], consumed by the snapshot fetcher.
#[derive(Debug, Clone)]
pub struct ContractSet {
    pub multicall3: Address,
    pub lgns_token: Address,
    pub slgns_token: Address,
    pub turbine_token: Address,
    pub reward_pool: Address,
    pub staking_query: Address,
    pub energy_stake_contracts: Vec<Address>,
    pub bond_contracts: Vec<Address>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub rpc: Rpc,
    #[serde(default)]
    pub contracts: Contracts,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("Config.toml").required(false))
            .build()?;

        let mut settings: Self = s.try_deserialize()?;

        // Environment variable override for RPC configuration
        if let Ok(url) = env::var("SNAPSHOT_SDK_RPC_URL") {
            if !url.trim().is_empty() {
                settings.rpc.url = url;
            }
        }

        Ok(settings)
    }

    /// Validates and parses the configured contract addresses.
    pub fn contract_set(&self) -> Result<ContractSet, SdkError> {
        Ok(ContractSet {
            multicall3: parse_address(&self.contracts.multicall3)?,
            lgns_token: parse_address(&self.contracts.lgns_token)?,
            slgns_token: parse_address(&self.contracts.slgns_token)?,
            turbine_token: parse_address(&self.contracts.turbine_token)?,
            reward_pool: parse_address(&self.contracts.reward_pool)?,
            staking_query: parse_address(&self.contracts.staking_query)?,
            energy_stake_contracts: parse_addresses(&self.contracts.energy_stake)?,
            bond_contracts: parse_addresses(&self.contracts.bonds)?,
        })
    }
}

fn parse_address(raw: &str) -> Result<Address, SdkError> {
    raw.trim()
        .parse()
        .map_err(|_| SdkError::InvalidAddress(raw.to_string()))
}

fn parse_addresses(raw: &[String]) -> Result<Vec<Address>, SdkError> {
    raw.iter().map(|s| parse_address(s)).collect()
}
