//! # Batch Run Controller
//!
//! Walks a deduplicated set of address pairs, builds one snapshot per pair
//! via [`SnapshotFetcher`], and reports progress after every address.
//!
//! Addresses are processed strictly one at a time. The snapshot fetcher
//! already fans out concurrently per address; running addresses in parallel
//! on top of that would multiply the in-flight request count against a
//! single RPC endpoint and make progress reporting non-monotonic.
//!
//! A per-address failure is recorded and the run moves on; the run itself
//! only refuses to start when another run is already in flight.

use ethers::prelude::*;
use indexmap::IndexMap;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{Result, SdkError};
use crate::snapshot::{SnapshotFetcher, StakingSnapshot};
use crate::types::{AddressPair, AddressReport, BatchRunResult};

pub struct BatchRunner<M: Middleware> {
    fetcher: SnapshotFetcher<M>,
    in_flight: AtomicBool,
}

impl<M: Middleware + 'static> BatchRunner<M> {
    pub fn new(fetcher: SnapshotFetcher<M>) -> Self {
        Self { fetcher, in_flight: AtomicBool::new(false) }
    }

    /// Runs one batch over `pairs`.
    ///
    /// Pairs are deduplicated by primary address, first occurrence's derived
    /// address winning, input order preserved. `on_progress` receives the
    /// rounded completion percentage after every address, successful or not.
    /// The returned result covers every deduplicated address exactly once;
    /// failed addresses carry `succeeded == false` and a zero snapshot.
    pub async fn run<F>(&self, pairs: &[AddressPair], mut on_progress: F) -> Result<BatchRunResult>
    where
        F: FnMut(u8),
    {
        let _guard = self.try_begin()?;

        let mut deduped: IndexMap<Address, Address> = IndexMap::new();
        for pair in pairs {
            deduped.entry(pair.primary).or_insert(pair.derived);
        }

        let total = deduped.len();
        let mut outcomes = IndexMap::with_capacity(total);
        if total == 0 {
            on_progress(100);
            return Ok(BatchRunResult { outcomes });
        }

        info!("batch run started: {total} addresses ({} before dedup)", pairs.len());

        for (completed, (&primary, &derived)) in deduped.iter().enumerate() {
            let report = match self.fetcher.build_snapshot(primary, derived).await {
                Ok(snapshot) => AddressReport { snapshot, succeeded: true },
                Err(e) => {
                    warn!("address {primary:?} failed, continuing: {e}");
                    AddressReport { snapshot: StakingSnapshot::default(), succeeded: false }
                }
            };
            outcomes.insert(primary, report);
            on_progress(percent(completed + 1, total));
        }

        info!(
            "batch run finished: {}/{total} addresses succeeded",
            outcomes.values().filter(|r| r.succeeded).count()
        );

        Ok(BatchRunResult { outcomes })
    }

    fn try_begin(&self) -> Result<InFlightGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SdkError::RunInProgress);
        }
        Ok(InFlightGuard(&self.in_flight))
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

fn percent(completed: usize, total: usize) -> u8 {
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{agg_response, contract_set, nested_staking_response, uint_word};
    use ethers::providers::{MockProvider, Provider};
    use std::sync::Arc;

    fn pair(primary: u64, derived: u64) -> AddressPair {
        AddressPair::new(
            Address::from_low_u64_be(primary),
            Address::from_low_u64_be(derived),
        )
    }

    fn runner(provider: Provider<MockProvider>) -> BatchRunner<Provider<MockProvider>> {
        BatchRunner::new(SnapshotFetcher::new(Arc::new(provider), contract_set(1, 1)))
    }

    /// Queues the four responses one empty-wallet address consumes, with
    /// `balance` as its sole token balance. Responses pop newest-first.
    fn push_address(mock: &MockProvider, balance: u64) {
        mock.push::<Bytes, _>(&agg_response(vec![(true, uint_word(0))]))
            .unwrap();
        mock.push::<Bytes, _>(&agg_response(vec![(true, uint_word(0))]))
            .unwrap();
        mock.push::<Bytes, _>(&nested_staking_response(false, 0)).unwrap();
        mock.push::<Bytes, _>(&agg_response(vec![
            (true, uint_word(0)),
            (true, uint_word(0)),
            (true, uint_word(balance)),
            (true, uint_word(0)),
        ]))
        .unwrap();
    }

    #[test]
    fn percent_rounds_to_the_nearest_point() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(1, 1), 100);
    }

    #[tokio::test]
    async fn deduplicates_by_primary_keeping_the_first_derived() {
        let (provider, mock) = Provider::mocked();
        // Two deduplicated addresses; queue the later one first.
        push_address(&mock, 222);
        push_address(&mock, 111);

        let runner = runner(provider);
        let pairs = vec![pair(0xa, 0xd1), pair(0xa, 0xd2), pair(0xb, 0xd3)];
        let result = runner.run(&pairs, |_| {}).await.unwrap();

        assert_eq!(result.len(), 2);
        let keys: Vec<_> = result.outcomes.keys().copied().collect();
        assert_eq!(keys, vec![Address::from_low_u64_be(0xa), Address::from_low_u64_be(0xb)]);
        // A's lgns balance came from the call keyed on D1 (111), proving the
        // first occurrence's derived address was used.
        assert_eq!(
            result.outcomes[&Address::from_low_u64_be(0xa)].snapshot.lgns_balance,
            U256::from(111)
        );
    }

    #[tokio::test]
    async fn per_address_failure_never_aborts_the_run() {
        let (provider, mock) = Provider::mocked();
        push_address(&mock, 3);
        // B's first round trip yields undecodable bytes and kills only B.
        mock.push::<Bytes, _>(&Bytes::from(vec![0xde, 0xad])).unwrap();
        push_address(&mock, 1);

        let runner = runner(provider);
        let pairs = vec![pair(0xa, 0xa1), pair(0xb, 0xb1), pair(0xc, 0xc1)];
        let mut reported = Vec::new();
        let result = runner.run(&pairs, |pct| reported.push(pct)).await.unwrap();

        assert_eq!(result.len(), 3);
        assert!(result.outcomes[&Address::from_low_u64_be(0xa)].succeeded);
        assert!(!result.outcomes[&Address::from_low_u64_be(0xb)].succeeded);
        assert!(result.outcomes[&Address::from_low_u64_be(0xc)].succeeded);
        assert_eq!(result.succeeded_count(), 2);
        assert_eq!(reported, vec![33, 67, 100]);
    }

    #[tokio::test]
    async fn empty_input_reports_full_progress_once() {
        let (provider, _mock) = Provider::mocked();
        let runner = runner(provider);

        let mut reported = Vec::new();
        let result = runner.run(&[], |pct| reported.push(pct)).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(reported, vec![100]);
    }

    #[tokio::test]
    async fn a_second_concurrent_run_is_rejected() {
        let (provider, _mock) = Provider::mocked();
        let runner = runner(provider);

        let _guard = runner.try_begin().unwrap();
        let err = runner.run(&[pair(1, 2)], |_| {}).await.unwrap_err();
        assert!(matches!(err, SdkError::RunInProgress));
    }

    #[tokio::test]
    async fn the_in_flight_flag_is_released_after_a_run() {
        let (provider, _mock) = Provider::mocked();
        let runner = runner(provider);

        runner.run(&[], |_| {}).await.unwrap();
        runner.run(&[], |_| {}).await.unwrap();
    }
}
