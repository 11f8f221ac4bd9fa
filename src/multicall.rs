use ethers::abi::{Function, Param, ParamType, StateMutability, Token};
use ethers::prelude::*;
use log::debug;
use std::sync::Arc;

use crate::errors::{Result, SdkError};

/// A single RPC call to be batched in a multicall.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Call {
    /// Target contract address
    pub target: Address,
    /// Encoded function call data
    pub call_data: Bytes,
}

/// Result of one call within a batch.
///
/// `success == false` means the sub-call reverted inside the aggregator;
/// `return_data` is then revert data (or empty) and must not be decoded as
/// the function's return shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallOutcome {
    pub success: bool,
    pub return_data: Bytes,
}

/// Multicall batch executor for optimized RPC reads.
///
/// Batches multiple contract calls into a single RPC request via the
/// Multicall3 `aggregate3` entrypoint, invoked in tolerant mode
/// (`allowFailure = true` on every sub-call): an individual revert surfaces
/// as `success == false` for that entry only and never aborts the batch.
///
/// One `aggregate` call is one round trip. The batcher does not split or
/// coalesce the call list; callers that may produce a huge list chunk it
/// before calling, since aggregators reject batches that exceed their gas
/// allowance.
#[derive(Clone)]
pub struct Multicall<M: Middleware> {
    provider: Arc<M>,
    multicall_address: Address,
}

impl<M: Middleware + 'static> Multicall<M> {
    pub fn new(provider: Arc<M>, multicall_address: Address) -> Self {
        Self { provider, multicall_address }
    }

    /// Runs one batch of calls in a single round trip.
    ///
    /// The output has the same length and order as `calls`. An empty input
    /// short-circuits to an empty output with no network traffic.
    pub async fn aggregate(&self, calls: &[Call]) -> Result<Vec<CallOutcome>> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        debug!("multicall aggregate: {} calls", calls.len());

        // Multicall3 aggregate3 function signature
        // function aggregate3(Call3[] calldata calls) public payable returns (Result[] memory returnData)
        // Call3 struct: { target, allowFailure, callData }
        // Result struct: { success, returnData }
        let mut call_tokens = Vec::with_capacity(calls.len());
        for call in calls {
            call_tokens.push(Token::Tuple(vec![
                Token::Address(call.target),
                Token::Bool(true), // allowFailure = true
                Token::Bytes(call.call_data.to_vec()),
            ]));
        }

        let calldata = aggregate3_function()
            .encode_input(&[Token::Array(call_tokens)])
            .map_err(|e| SdkError::Decode(format!("aggregate3 encode failed: {e}")))?;

        let tx_request = TransactionRequest::new()
            .to(self.multicall_address)
            .data(calldata);
        let typed_tx: ethers::types::transaction::eip2718::TypedTransaction = tx_request.into();
        let response = self
            .provider
            .call(&typed_tx, None)
            .await
            .map_err(|e| SdkError::Network(e.to_string()))?;

        let decoded = ethers::abi::decode(
            &[ParamType::Array(Box::new(ParamType::Tuple(vec![
                ParamType::Bool,
                ParamType::Bytes,
            ])))],
            &response,
        )
        .map_err(|e| SdkError::Decode(format!("aggregate3 response: {e}")))?;

        let results_array = decoded
            .into_iter()
            .next()
            .and_then(|t| t.into_array())
            .ok_or_else(|| SdkError::Decode("invalid multicall response format".to_string()))?;

        let mut outcomes = Vec::with_capacity(results_array.len());
        for result_token in results_array {
            let tuple = result_token
                .into_tuple()
                .ok_or_else(|| SdkError::Decode("multicall result is not a tuple".to_string()))?;
            match (tuple.first(), tuple.get(1)) {
                (Some(Token::Bool(success)), Some(Token::Bytes(data))) => {
                    outcomes.push(CallOutcome {
                        success: *success,
                        return_data: Bytes::from(data.clone()),
                    });
                }
                _ => {
                    return Err(SdkError::Decode(
                        "malformed multicall result tuple".to_string(),
                    ))
                }
            }
        }

        if outcomes.len() != calls.len() {
            return Err(SdkError::Decode(format!(
                "multicall returned {} results for {} calls",
                outcomes.len(),
                calls.len()
            )));
        }

        Ok(outcomes)
    }
}

#[allow(deprecated)]
fn aggregate3_function() -> Function {
    Function {
        name: "aggregate3".to_string(),
        inputs: vec![Param {
            name: "calls".to_string(),
            kind: ParamType::Array(Box::new(ParamType::Tuple(vec![
                ParamType::Address,
                ParamType::Bool,
                ParamType::Bytes,
            ]))),
            internal_type: None,
        }],
        outputs: vec![Param {
            name: "returnData".to_string(),
            kind: ParamType::Array(Box::new(ParamType::Tuple(vec![
                ParamType::Bool,
                ParamType::Bytes,
            ]))),
            internal_type: None,
        }],
        constant: None,
        state_mutability: StateMutability::Payable,
    }
}
