//! # Snapshot Orchestrator
//!
//! Builds one fully-resolved [`StakingSnapshot`] per address pair. Four
//! fetches are issued concurrently against the chain and joined with
//! parallel-wait semantics:
//!
//! - one multicall batch for the simple balances (turbine, claimable zhuwang
//!   reward, LGNS and sLGNS token balances),
//! - the raw total-staking query,
//! - the two-phase airdrop energy stake walk,
//! - the two-phase bond walk.
//!
//! The inner layers absorb routine per-call failures (a wallet simply has no
//! position in a given contract); a branch failing *after* that degradation
//! is a real fault and aborts the snapshot for that address.

use ethers::abi::{AbiDecode, AbiEncode};
use ethers::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::codec;
use crate::collection;
use crate::contracts::bond_ledger::{BondCountCall, BondInfoCall, BondInfoReturn};
use crate::contracts::energy_stake::{StakeCountCall, StakeRecordsCall, StakeRecordsReturn};
use crate::contracts::erc20::BalanceOfCall;
use crate::contracts::reward_pool::PendingRewardOfCall;
use crate::errors::{Result, SdkError};
use crate::multicall::{Call, Multicall};
use crate::raw_query;
use crate::settings::ContractSet;

/// One wallet's resolved on-chain position, in token base units.
///
/// Always fully populated: a field whose source call failed or returned no
/// data is zero, never absent. Immutable once built; the next run supersedes
/// it rather than mutating it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingSnapshot {
    pub total_staking: U256,
    pub airdrop_energy_staking: U256,
    pub bond_staking: U256,
    pub zhuwang_reward: U256,
    pub turbine_balance: U256,
    pub lgns_balance: U256,
    pub slgns_balance: U256,
}

struct TokenBalances {
    turbine: U256,
    zhuwang_reward: U256,
    lgns: U256,
    slgns: U256,
}

/// Per-address snapshot builder over one provider handle and one contract
/// configuration.
#[derive(Clone)]
pub struct SnapshotFetcher<M: Middleware> {
    provider: Arc<M>,
    multicall: Multicall<M>,
    contracts: ContractSet,
}

impl<M: Middleware + 'static> SnapshotFetcher<M> {
    pub fn new(provider: Arc<M>, contracts: ContractSet) -> Self {
        let multicall = Multicall::new(provider.clone(), contracts.multicall3);
        Self { provider, multicall, contracts }
    }

    /// Resolves the full snapshot for one address pair.
    ///
    /// The simple balances and claimable reward are keyed on `primary` and
    /// `derived` as configured; stakes, bonds and the raw total-staking
    /// query are keyed on `primary`. Any branch failing aborts the snapshot
    /// with [`SdkError::Snapshot`].
    pub async fn build_snapshot(
        &self,
        primary: Address,
        derived: Address,
    ) -> Result<StakingSnapshot> {
        let total_staking = async {
            Ok::<U256, SdkError>(
                raw_query::query_total_staking(
                    self.provider.as_ref(),
                    self.contracts.staking_query,
                    primary,
                )
                .await,
            )
        };

        let (balances, total_staking, airdrop_energy_staking, bond_staking) = tokio::try_join!(
            self.fetch_balances(primary, derived),
            total_staking,
            self.fetch_airdrop_energy(primary),
            self.fetch_bonds(primary),
        )
        .map_err(|source| SdkError::Snapshot { address: primary, source: Box::new(source) })?;

        Ok(StakingSnapshot {
            total_staking,
            airdrop_energy_staking,
            bond_staking,
            zhuwang_reward: balances.zhuwang_reward,
            turbine_balance: balances.turbine,
            lgns_balance: balances.lgns,
            slgns_balance: balances.slgns,
        })
    }

    async fn fetch_balances(&self, primary: Address, derived: Address) -> Result<TokenBalances> {
        let calls = [
            Call {
                target: self.contracts.turbine_token,
                call_data: BalanceOfCall { account: primary }.encode().into(),
            },
            Call {
                target: self.contracts.reward_pool,
                call_data: PendingRewardOfCall { account: primary }.encode().into(),
            },
            Call {
                target: self.contracts.lgns_token,
                call_data: BalanceOfCall { account: derived }.encode().into(),
            },
            Call {
                target: self.contracts.slgns_token,
                call_data: BalanceOfCall { account: derived }.encode().into(),
            },
        ];

        let outcomes = self.multicall.aggregate(&calls).await?;
        Ok(TokenBalances {
            turbine: codec::decode_or_zero(&outcomes[0]),
            zhuwang_reward: codec::decode_or_zero(&outcomes[1]),
            lgns: codec::decode_or_zero(&outcomes[2]),
            slgns: codec::decode_or_zero(&outcomes[3]),
        })
    }

    async fn fetch_airdrop_energy(&self, primary: Address) -> Result<U256> {
        collection::fetch_total(
            &self.multicall,
            primary,
            &self.contracts.energy_stake_contracts,
            |owner| StakeCountCall { owner }.encode().into(),
            |owner, index| StakeRecordsCall { owner, index }.encode().into(),
            |raw| {
                let record = StakeRecordsReturn::decode(raw).ok()?;
                record.exists.then_some(record.principal)
            },
        )
        .await
    }

    async fn fetch_bonds(&self, primary: Address) -> Result<U256> {
        collection::fetch_total(
            &self.multicall,
            primary,
            &self.contracts.bond_contracts,
            |owner| BondCountCall { owner }.encode().into(),
            |owner, index| BondInfoCall { owner, index }.encode().into(),
            |raw| {
                let bond = BondInfoReturn::decode(raw).ok()?;
                (bond.owner != Address::zero()).then_some(bond.payout)
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        agg_response, contract_set, nested_staking_response, uint_word,
    };
    use ethers::providers::Provider;

    fn primary() -> Address {
        Address::from_low_u64_be(0x1111)
    }

    fn derived() -> Address {
        Address::from_low_u64_be(0x2222)
    }

    #[tokio::test]
    async fn empty_wallet_snapshots_to_all_zero() {
        let (provider, mock) = Provider::mocked();
        let fetcher = SnapshotFetcher::new(Arc::new(provider), contract_set(1, 1));

        // Responses pop newest-first; the branches settle in declaration
        // order: balances, raw query, stake counts, bond counts.
        mock.push::<Bytes, _>(&agg_response(vec![(true, uint_word(0))]))
            .unwrap();
        mock.push::<Bytes, _>(&agg_response(vec![(true, uint_word(0))]))
            .unwrap();
        mock.push::<Bytes, _>(&nested_staking_response(false, 0)).unwrap();
        mock.push::<Bytes, _>(&agg_response(vec![(false, Vec::new()); 4]))
            .unwrap();

        let snapshot = fetcher.build_snapshot(primary(), derived()).await.unwrap();
        assert_eq!(snapshot, StakingSnapshot::default());
    }

    #[tokio::test]
    async fn balance_batch_failure_aborts_the_snapshot() {
        let (provider, mock) = Provider::mocked();
        let fetcher = SnapshotFetcher::new(Arc::new(provider), contract_set(1, 1));

        mock.push::<Bytes, _>(&Bytes::from(vec![0xde, 0xad])).unwrap();

        let err = fetcher.build_snapshot(primary(), derived()).await.unwrap_err();
        match err {
            SdkError::Snapshot { address, source } => {
                assert_eq!(address, primary());
                assert!(matches!(*source, SdkError::Decode(_)));
            }
            other => panic!("expected snapshot error, got {other}"),
        }
    }

    #[tokio::test]
    async fn a_populated_wallet_fills_every_field() {
        let (provider, mock) = Provider::mocked();
        let fetcher = SnapshotFetcher::new(Arc::new(provider), contract_set(1, 1));

        // Bond items: one owned slot (payout 70), one vacant slot ignored.
        let owned = BondInfoReturn {
            payout: U256::from(70),
            vesting: U256::zero(),
            last_timestamp: U256::zero(),
            owner: primary(),
        };
        let vacant = BondInfoReturn {
            payout: U256::from(999),
            vesting: U256::zero(),
            last_timestamp: U256::zero(),
            owner: Address::zero(),
        };
        mock.push::<Bytes, _>(&agg_response(vec![
            (true, owned.encode()),
            (true, vacant.encode()),
        ]))
        .unwrap();
        mock.push::<Bytes, _>(&agg_response(vec![(true, uint_word(2))]))
            .unwrap();

        // Stake items: one live record (principal 60), one tombstone.
        let live = StakeRecordsReturn {
            principal: U256::from(60),
            power: U256::zero(),
            unlock_time: U256::zero(),
            exists: true,
        };
        let tombstone = StakeRecordsReturn {
            principal: U256::from(999),
            power: U256::zero(),
            unlock_time: U256::zero(),
            exists: false,
        };
        mock.push::<Bytes, _>(&agg_response(vec![
            (true, live.encode()),
            (true, tombstone.encode()),
        ]))
        .unwrap();
        mock.push::<Bytes, _>(&agg_response(vec![(true, uint_word(2))]))
            .unwrap();

        mock.push::<Bytes, _>(&nested_staking_response(true, 100)).unwrap();
        mock.push::<Bytes, _>(&agg_response(vec![
            (true, uint_word(40)), // turbine, primary
            (true, uint_word(30)), // zhuwang reward, primary
            (true, uint_word(10)), // lgns, derived
            (true, uint_word(20)), // slgns, derived
        ]))
        .unwrap();

        let snapshot = fetcher.build_snapshot(primary(), derived()).await.unwrap();
        assert_eq!(
            snapshot,
            StakingSnapshot {
                total_staking: U256::from(100),
                airdrop_energy_staking: U256::from(60),
                bond_staking: U256::from(70),
                zhuwang_reward: U256::from(30),
                turbine_balance: U256::from(40),
                lgns_balance: U256::from(10),
                slgns_balance: U256::from(20),
            }
        );
    }
}
