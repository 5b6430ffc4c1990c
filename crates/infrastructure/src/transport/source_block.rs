use ipnetwork::{IpNetwork, Ipv6Network};
use ring::rand::SecureRandom;
use std::net::Ipv6Addr;
use tubegate_domain::DomainError;

/// IPv6 prefix from which outbound source addresses are drawn.
///
/// Only prefixes on a 16-bit group boundary are accepted, so the fixed part
/// always covers whole bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceBlock {
    network: Ipv6Network,
}

impl SourceBlock {
    pub fn parse(cidr: &str) -> Result<Self, DomainError> {
        let network = match cidr.trim().parse::<IpNetwork>() {
            Ok(IpNetwork::V6(network)) => network,
            Ok(IpNetwork::V4(_)) => {
                return Err(DomainError::AddressBlockMisconfigured(format!(
                    "{} is not an IPv6 network",
                    cidr
                )))
            }
            Err(e) => {
                return Err(DomainError::AddressBlockMisconfigured(format!(
                    "cannot parse {}: {}",
                    cidr, e
                )))
            }
        };

        if network.prefix() % 16 != 0 {
            return Err(DomainError::AddressBlockMisconfigured(format!(
                "prefix length /{} is not a multiple of 16",
                network.prefix()
            )));
        }

        Ok(Self { network })
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    pub fn contains(&self, addr: Ipv6Addr) -> bool {
        self.network.contains(addr)
    }

    /// Copies the prefix bytes and fills the remainder from `rng`.
    pub fn random_address(&self, rng: &dyn SecureRandom) -> Result<Ipv6Addr, DomainError> {
        let fixed = usize::from(self.network.prefix() / 8);
        let mut octets = self.network.network().octets();

        rng.fill(&mut octets[fixed..]).map_err(|_| {
            DomainError::AddressBlockMisconfigured("system random source failed".to_string())
        })?;

        Ok(Ipv6Addr::from(octets))
    }
}
