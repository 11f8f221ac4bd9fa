//! Raw custom-encoded total-staking query.
//!
//! The staking query helper has no published interface description; its
//! calldata is a nested multicall captured as a byte-exact template. The
//! helper executes two pre-encoded sub-calls server-side (the staking index
//! and the owner's staked balance) and answers with
//! `(bool[] successes, bytes[] results)`; the total is the `uint256` in
//! `results[1]`. Only the 20-byte owner slot in the template varies —
//! everything else must be reproduced byte-for-byte to stay wire-compatible.

use ethers::abi::{AbiDecode, ParamType};
use ethers::prelude::*;
use log::{debug, warn};

// Calldata template, split around the owner address slot. Wire literal.
const TOTAL_STAKING_PREFIX: &str = concat!(
    "c2f5ca3a",
    "0000000000000000000000000000000000000000000000000000000000000020",
    "0000000000000000000000000000000000000000000000000000000000000002",
    "0000000000000000000000000000000000000000000000000000000000000040",
    "0000000000000000000000000000000000000000000000000000000000000080",
    "0000000000000000000000000000000000000000000000000000000000000004",
    "2986c0e500000000000000000000000000000000000000000000000000000000",
    "0000000000000000000000000000000000000000000000000000000000000024",
    "4f1bfc9e",
    "000000000000000000000000",
);
const TOTAL_STAKING_SUFFIX: &str = "00000000000000000000000000000000000000000000000000000000";

/// Byte offset of the owner address slot within the assembled payload.
pub const OWNER_SLOT_OFFSET: usize = 244;

/// Assembles the query calldata for `owner`: the template with the
/// lower-cased, `0x`-stripped address substituted into its fixed slot.
pub fn total_staking_calldata(owner: Address) -> Bytes {
    let payload = format!(
        "{TOTAL_STAKING_PREFIX}{}{TOTAL_STAKING_SUFFIX}",
        hex::encode(owner.as_bytes())
    );
    Bytes::from(hex::decode(payload).expect("template is valid hex"))
}

/// Resolves the specialized total-staking figure for `owner` with one direct
/// call to the query helper.
///
/// Fail-soft by contract: network errors, decode errors and short or
/// unsuccessful result sets all degrade to zero, never to the caller.
pub async fn query_total_staking<M: Middleware>(
    provider: &M,
    query_contract: Address,
    owner: Address,
) -> U256 {
    let tx_request = TransactionRequest::new()
        .to(query_contract)
        .data(total_staking_calldata(owner));
    let typed_tx: ethers::types::transaction::eip2718::TypedTransaction = tx_request.into();

    let response = match provider.call(&typed_tx, None).await {
        Ok(response) => response,
        Err(e) => {
            warn!("total staking query failed for {owner:?}, reading as zero: {e}");
            return U256::zero();
        }
    };

    decode_total(&response).unwrap_or_else(|| {
        debug!("total staking response unusable for {owner:?}, reading as zero");
        U256::zero()
    })
}

fn decode_total(raw: &Bytes) -> Option<U256> {
    let tokens = ethers::abi::decode(
        &[
            ParamType::Array(Box::new(ParamType::Bool)),
            ParamType::Array(Box::new(ParamType::Bytes)),
        ],
        raw,
    )
    .ok()?;

    let mut tokens = tokens.into_iter();
    let successes: Vec<bool> = tokens
        .next()?
        .into_array()?
        .into_iter()
        .map(|t| t.into_bool())
        .collect::<Option<_>>()?;
    let results: Vec<Vec<u8>> = tokens
        .next()?
        .into_array()?
        .into_iter()
        .map(|t| t.into_bytes())
        .collect::<Option<_>>()?;

    if results.len() > 1 && successes.get(1).copied() == Some(true) {
        U256::decode(results[1].as_slice()).ok()
    } else {
        None
    }
}
