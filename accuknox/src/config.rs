use tonic::transport::Endpoint;

use crate::error::Error;

/// Relay address used when none is given.
pub const DEFAULT_RELAY_ADDR: &str = "localhost:4245";

/// Discovery engine address used when neither `--grpc` nor the environment set one.
pub const DEFAULT_DISCOVERY_ADDR: &str = "localhost:9089";

/// Environment variable overriding the discovery engine address.
pub const DISCOVERY_SERVICE_ENV: &str = "DISCOVERY_SERVICE";

/// Number of flows requested when not following.
pub const BOUNDED_FLOW_COUNT: u64 = 20;

/// Turns a `host:port` address into a URI the transport accepts.
pub fn endpoint_uri(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    }
}

/// Parses the address into a plaintext endpoint.
pub fn endpoint(addr: &str) -> Result<Endpoint, Error> {
    Endpoint::from_shared(endpoint_uri(addr)).map_err(|e| Error::InvalidAddress {
        addr: addr.to_string(),
        reason: e.to_string(),
    })
}

/// Flow count to request: everything when following.
pub fn flow_count(follow: bool) -> u64 {
    if follow {
        u64::MAX
    } else {
        BOUNDED_FLOW_COUNT
    }
}

/// Settings of a flow session.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub addr: String,
    pub follow: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_RELAY_ADDR.to_string(),
            follow: false,
        }
    }
}

impl RelayConfig {
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.addr = addr.into();
        self
    }

    pub fn follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_is_added_once() {
        assert_eq!("http://localhost:4245", endpoint_uri("localhost:4245"));
        assert_eq!("https://relay:443", endpoint_uri("https://relay:443"));
    }

    #[test]
    fn invalid_address() {
        assert!(matches!(
            endpoint("local host:4245"),
            Err(Error::InvalidAddress { .. })
        ));
        assert!(endpoint(DEFAULT_RELAY_ADDR).is_ok());
    }

    #[test]
    fn bounded_unless_following() {
        assert_eq!(BOUNDED_FLOW_COUNT, flow_count(false));
        assert_eq!(u64::MAX, flow_count(true));
    }
}
