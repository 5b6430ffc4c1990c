use super::resolver::resolve_all;
use dashmap::DashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct ReachabilityRecord {
    pub supports_extended_addressing: bool,
    pub checked_at: Instant,
}

/// Per-destination cache of whether `host:port` resolves to any IPv6 address.
pub struct ReachabilityCache {
    records: DashMap<String, ReachabilityRecord>,
    ttl: Duration,
    resolve_timeout: Duration,
}

impl ReachabilityCache {
    pub fn new(ttl: Duration, resolve_timeout: Duration) -> Self {
        Self {
            records: DashMap::new(),
            ttl,
            resolve_timeout,
        }
    }

    /// Cached answer when fresh, otherwise a new resolution check. A failed
    /// resolution is recorded as unsupported.
    pub async fn supports_extended_addressing(&self, host: &str, port: u16) -> bool {
        let destination = format!("{}:{}", host, port);

        if let Some(record) = self.records.get(&destination) {
            if record.checked_at.elapsed() < self.ttl {
                debug!(
                    destination = %destination,
                    supported = record.supports_extended_addressing,
                    "Using cached reachability"
                );
                return record.supports_extended_addressing;
            }
        }

        let supported = self.check(host, port).await;
        self.records.insert(
            destination.clone(),
            ReachabilityRecord {
                supports_extended_addressing: supported,
                checked_at: Instant::now(),
            },
        );
        debug!(destination = %destination, supported, "Reachability cache updated");
        supported
    }

    async fn check(&self, host: &str, port: u16) -> bool {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return ip.is_ipv6();
        }

        match resolve_all(host, port, self.resolve_timeout).await {
            Ok(addrs) => addrs.iter().any(|a| a.is_ipv6()),
            Err(e) => {
                debug!(host, error = %e, "Resolution failed, assuming no IPv6");
                false
            }
        }
    }

    pub fn record(&self, host: &str, port: u16) -> Option<ReachabilityRecord> {
        self.records
            .get(&format!("{}:{}", host, port))
            .map(|r| *r.value())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
