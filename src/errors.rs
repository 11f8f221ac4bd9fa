// Error taxonomy for the snapshot engine.
//
// The split mirrors the propagation policy: `Network` and `Decode` are raised
// by the batching layers, absorbed or propagated depending on the call site;
// `Snapshot` wraps whichever of the two killed an address's snapshot build.

use ethers::types::Address;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdkError>;

#[derive(Debug, Error)]
pub enum SdkError {
    /// The RPC round trip itself failed (DNS, timeout, connection refused).
    #[error("network error: {0}")]
    Network(String),

    /// Returned bytes did not match the expected shape. Usually an ABI
    /// mismatch or an unexpected chain response.
    #[error("decode error: {0}")]
    Decode(String),

    /// One of the snapshot branches failed for an address, after the
    /// branch-internal zero-degradation already applied.
    #[error("snapshot failed for {address:?}")]
    Snapshot {
        address: Address,
        #[source]
        source: Box<SdkError>,
    },

    /// A batch run was started while another one was still in flight.
    #[error("a batch run is already in progress")]
    RunInProgress,

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid contract or wallet address: {0}")]
    InvalidAddress(String),
}
