//! Two-phase count-then-fetch over variable-length on-chain collections.
//!
//! On-chain dynamic arrays expose a length getter and an indexed item getter;
//! the length must be known before indexed reads are possible. Phase one
//! batches one count call per contract, phase two expands the counts into
//! indexed item calls and batches those, chunked to keep each aggregate
//! within the gas allowance of the multicall contract.

use ethers::types::{Address, Bytes, U256};
use log::{debug, warn};

use crate::codec;
use crate::errors::Result;
use crate::multicall::{Call, Multicall};
use ethers::providers::Middleware;

/// Item calls per aggregate round trip.
pub const ITEM_CHUNK_SIZE: usize = 50;

/// Upper bound on items read from one contract. A count above this is
/// treated like a count decode mismatch and zeroes the contract.
const MAX_ITEMS_PER_CONTRACT: u64 = 10_000;

/// Sums a caller-defined contribution over every item an `owner` holds
/// across a family of collection contracts.
///
/// `count_calldata` encodes the per-contract length getter, `item_calldata`
/// the indexed item getter, and `extract` turns one item's raw return bytes
/// into its contribution (`None` to skip). Failed count calls silently
/// exclude their contract; failed or unextractable item calls contribute
/// zero. Only a failed round trip itself is an error.
pub async fn fetch_total<M, FC, FI, FX>(
    multicall: &Multicall<M>,
    owner: Address,
    contracts: &[Address],
    count_calldata: FC,
    item_calldata: FI,
    extract: FX,
) -> Result<U256>
where
    M: Middleware + 'static,
    FC: Fn(Address) -> Bytes,
    FI: Fn(Address, U256) -> Bytes,
    FX: Fn(&Bytes) -> Option<U256>,
{
    if contracts.is_empty() {
        return Ok(U256::zero());
    }

    let count_calls: Vec<Call> = contracts
        .iter()
        .map(|&target| Call { target, call_data: count_calldata(owner) })
        .collect();
    let count_outcomes = multicall.aggregate(&count_calls).await?;

    let mut item_calls = Vec::new();
    for (&contract, outcome) in contracts.iter().zip(&count_outcomes) {
        let count = match codec::decode_outcome::<U256>(outcome) {
            Ok(count) => count,
            Err(e) => {
                debug!("count call failed on {contract:?}, contributes zero: {e}");
                continue;
            }
        };
        if count > U256::from(MAX_ITEMS_PER_CONTRACT) {
            warn!("implausible item count {count} on {contract:?}, contributes zero");
            continue;
        }
        for i in 0..count.as_u64() {
            item_calls.push(Call {
                target: contract,
                call_data: item_calldata(owner, U256::from(i)),
            });
        }
    }

    if item_calls.is_empty() {
        return Ok(U256::zero());
    }

    let mut total = U256::zero();
    for chunk in item_calls.chunks(ITEM_CHUNK_SIZE) {
        let outcomes = multicall.aggregate(chunk).await?;
        for outcome in &outcomes {
            if !outcome.success || outcome.return_data.is_empty() {
                continue;
            }
            if let Some(contribution) = extract(&outcome.return_data) {
                total = total.saturating_add(contribution);
            }
        }
    }

    Ok(total)
}
