//! RPC connection handle.
//!
//! The provider is explicit, owned state handed to the components that need
//! it. There is no endpoint-keyed provider cache: reconfiguring the endpoint
//! means calling [`connect`] again and rebuilding whatever holds the old
//! handle.

use ethers::providers::{Http, Provider};
use std::sync::Arc;

use crate::errors::{Result, SdkError};

/// Builds a provider handle for one HTTP JSON-RPC endpoint.
pub fn connect(url: &str) -> Result<Arc<Provider<Http>>> {
    let provider =
        Provider::<Http>::try_from(url).map_err(|e| SdkError::Network(e.to_string()))?;
    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_urls() {
        assert!(matches!(connect("not a url"), Err(SdkError::Network(_))));
    }

    #[test]
    fn accepts_http_endpoints() {
        assert!(connect("http://localhost:8545").is_ok());
    }
}
