//! Typed decode step over raw call results.
//!
//! The encode half lives on the `abigen!`-generated call structs
//! ([`crate::contracts`]); this module owns the decode half, turning raw
//! return bytes into the generated typed return structs and enforcing the
//! rule that failed outcomes are never decoded.

use ethers::abi::AbiDecode;
use ethers::types::{Bytes, U256};
use log::debug;

use crate::errors::{Result, SdkError};
use crate::multicall::CallOutcome;

/// Decodes raw return bytes into a typed return value.
///
/// Empty bytes are a decode error: a successful call to a function with a
/// non-empty return tuple always yields data, so emptiness means the
/// interface spec and the chain disagree.
pub fn decode_return<T: AbiDecode>(raw: &Bytes) -> Result<T> {
    if raw.is_empty() {
        return Err(SdkError::Decode("empty return data".to_string()));
    }
    T::decode(raw).map_err(|e| SdkError::Decode(e.to_string()))
}

/// Decodes a batched call outcome, refusing outcomes with `success == false`
/// before the bytes are ever looked at.
pub fn decode_outcome<T: AbiDecode>(outcome: &CallOutcome) -> Result<T> {
    if !outcome.success {
        return Err(SdkError::Decode("call reverted, no data to decode".to_string()));
    }
    decode_return(&outcome.return_data)
}

/// Zero-defaulting decode for balance-style `uint256` outcomes. Reverts,
/// empty returns, and shape mismatches all read as zero.
pub fn decode_or_zero(outcome: &CallOutcome) -> U256 {
    match decode_outcome::<U256>(outcome) {
        Ok(value) => value,
        Err(e) => {
            debug!("balance outcome defaulted to zero: {e}");
            U256::zero()
        }
    }
}
