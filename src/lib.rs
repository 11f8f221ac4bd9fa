//! # Staking Snapshot SDK
//!
//! A read-only Rust library that aggregates on-chain balances and staking
//! positions for a curated list of wallet address pairs on one EVM-compatible
//! chain, batching many contract reads into few RPC round trips.
//!
//! ## Overview
//!
//! The SDK turns a list of (primary address, derived address) pairs into one
//! fully-resolved [`snapshot::StakingSnapshot`] per address. It focuses on:
//!
//! - **Batching**: Multicall3-based read aggregation with tolerant per-call
//!   failure handling
//! - **Dynamic collections**: a two-phase count-then-fetch protocol for
//!   on-chain arrays of stakes and bonds
//! - **Isolation**: per-address failures never abort a batch run
//!
//! ## Architecture
//!
//! The engine is layered, leaves first:
//!
//! ### Call Layer
//! `abigen!` bindings encode typed calls; [`codec`] decodes raw returns into
//! typed values and enforces that failed outcomes are never decoded.
//!
//! ### Batching Layer
//! [`multicall`] submits many calls as one round trip; [`collection`] runs
//! the count-then-fetch protocol on top of it; [`raw_query`] carries the one
//! byte-exact query the generic encoder cannot express.
//!
//! ### Orchestration Layer
//! [`snapshot`] merges the four concurrent fetches of one address into an
//! immutable record; [`batch_runner`] walks the deduplicated address set
//! sequentially and reports progress.

// Batching & Call Layer
/// Multicall3 batch executor
pub mod multicall;
/// Typed decoding of raw call results
pub mod codec;
/// Count-then-fetch over variable-length on-chain collections
pub mod collection;
/// Byte-exact total-staking query
pub mod raw_query;
/// Contract ABIs
pub mod contracts;

// Orchestration
/// Per-address snapshot construction
pub mod snapshot;
/// Sequential batch run controller
pub mod batch_runner;

// Infrastructure
/// Error taxonomy
pub mod errors;
/// RPC connection handle
pub mod rpc;
/// File/env configuration
pub mod settings;
/// Boundary types (address pairs, run results)
pub mod types;

#[cfg(test)]
mod test_support;

pub use batch_runner::BatchRunner;
pub use errors::{Result, SdkError};
pub use multicall::{Call, CallOutcome, Multicall};
pub use snapshot::{SnapshotFetcher, StakingSnapshot};
pub use types::{AddressPair, AddressReport, BatchRunResult};
