//! Input and output types crossing the engine boundary.

use ethers::types::Address;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::snapshot::StakingSnapshot;

/// A watched wallet: the primary account plus the derived (safe/vault)
/// account used for certain token balance lookups.
///
/// `primary` is the deduplication key for a batch run. Parsing into
/// [`Address`] makes comparison case-insensitive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPair {
    pub primary: Address,
    pub derived: Address,
    /// Free-text user annotation, carried through untouched. The engine
    /// never reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl AddressPair {
    pub fn new(primary: Address, derived: Address) -> Self {
        Self { primary, derived, remark: None }
    }
}

/// Per-address outcome of a batch run.
///
/// A failed address still carries a (zeroed) snapshot; callers that persist
/// results typically keep the previous run's snapshot for those entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressReport {
    pub snapshot: StakingSnapshot,
    pub succeeded: bool,
}

/// Result of one batch run: every deduplicated input address exactly once,
/// in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRunResult {
    pub outcomes: IndexMap<Address, AddressReport>,
}

impl BatchRunResult {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of addresses whose snapshot build succeeded.
    pub fn succeeded_count(&self) -> usize {
        self.outcomes.values().filter(|r| r.succeeded).count()
    }
}
