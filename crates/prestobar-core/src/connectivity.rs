//! Internet reachability check.

use std::future::Future;
use std::time::Duration;

use tokio::net::TcpStream;
use tracing::debug;

/// Default hosts tried by [`TcpProbe`]
pub const DEFAULT_PROBE_HOSTS: &[&str] = &["1.1.1.1:443", "8.8.8.8:443", "prestocard.ca:443"];

/// Answers whether a network path to the internet exists
pub trait ConnectivityProbe: Send + Sync {
    fn is_online(&self) -> impl Future<Output = bool> + Send;
}

/// Probe that opens a TCP connection to well-known hosts
pub struct TcpProbe {
    hosts: Vec<String>,
    timeout: Duration,
}

impl TcpProbe {
    /// Create a probe over the given `host:port` list
    pub fn new(hosts: Vec<String>, timeout: Duration) -> Self {
        Self { hosts, timeout }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROBE_HOSTS.iter().map(|h| h.to_string()).collect(),
            Duration::from_secs(3),
        )
    }
}

impl ConnectivityProbe for TcpProbe {
    /// Online as soon as one host accepts a connection
    async fn is_online(&self) -> bool {
        for host in &self.hosts {
            match tokio::time::timeout(self.timeout, TcpStream::connect(host.as_str())).await {
                Ok(Ok(_)) => {
                    debug!("Connectivity probe: reached {}", host);
                    return true;
                }
                Ok(Err(e)) => debug!("Connectivity probe: {} failed: {}", host, e),
                Err(_) => debug!("Connectivity probe: {} timed out", host),
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_reachable_local_listener_is_online() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind listener");
        let addr = listener.local_addr().expect("Should have local addr");

        let probe = TcpProbe::new(vec![addr.to_string()], Duration::from_secs(1));
        assert!(probe.is_online().await);
    }

    #[tokio::test]
    async fn test_no_hosts_is_offline() {
        let probe = TcpProbe::new(Vec::new(), Duration::from_millis(100));
        assert!(!probe.is_online().await);
    }

    #[tokio::test]
    async fn test_falls_through_to_next_host() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind listener");
        let addr = listener.local_addr().expect("Should have local addr");

        let probe = TcpProbe::new(
            vec!["not-a-host.invalid:1".to_string(), addr.to_string()],
            Duration::from_secs(1),
        );
        assert!(probe.is_online().await);
    }
}
