use std::{collections::HashMap, fmt, str::FromStr};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::constants::{MAINNET_PASSPHRASE, MAINNET_RPC_URL, TESTNET_PASSPHRASE, TESTNET_RPC_URL};
use crate::error::{BelugaError, Result};

// FEE TIERS

/// The three fee tiers supported by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeeTierId {
    Stable,
    Volatile,
    Exotic,
}

/// Immutable fee tier record
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct FeeTier {
    pub id: FeeTierId,
    pub name: &'static str,
    pub bps: u32,
    pub tick_spacing: i32,
    pub display_percent: &'static str,
    pub description: &'static str,
}

pub static FEE_TIERS: [FeeTier; 3] = [
    FeeTier {
        id: FeeTierId::Stable,
        name: "STABLE",
        bps: 5,
        tick_spacing: 10,
        display_percent: "0.05",
        description: "For stablecoin pairs (0.05% fee)",
    },
    FeeTier {
        id: FeeTierId::Volatile,
        name: "VOLATILE",
        bps: 30,
        tick_spacing: 60,
        display_percent: "0.30",
        description: "For volatile pairs (0.30% fee)",
    },
    FeeTier {
        id: FeeTierId::Exotic,
        name: "EXOTIC",
        bps: 100,
        tick_spacing: 200,
        display_percent: "1.00",
        description: "For exotic/meme pairs (1.00% fee)",
    },
];

lazy_static! {
    static ref FEE_TIERS_BY_NAME: HashMap<&'static str, &'static FeeTier> =
        FEE_TIERS.iter().map(|tier| (tier.name, tier)).collect();
}

impl FeeTier {
    /// Case-insensitive lookup by tier name.
    pub fn by_name(name: &str) -> Result<&'static FeeTier> {
        FEE_TIERS_BY_NAME
            .get(name.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| BelugaError::UnknownFeeTier(name.to_string()))
    }
}

impl FeeTierId {
    pub fn tier(self) -> &'static FeeTier {
        match self {
            FeeTierId::Stable => &FEE_TIERS[0],
            FeeTierId::Volatile => &FEE_TIERS[1],
            FeeTierId::Exotic => &FEE_TIERS[2],
        }
    }

    pub fn name(self) -> &'static str {
        self.tier().name
    }
}

impl FromStr for FeeTierId {
    type Err = BelugaError;

    fn from_str(s: &str) -> Result<Self> {
        FeeTier::by_name(s).map(|tier| tier.id)
    }
}

impl fmt::Display for FeeTierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// NETWORKS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Testnet,
    Mainnet,
}

impl Network {
    pub fn config(self) -> NetworkConfig {
        match self {
            Network::Testnet => NetworkConfig {
                rpc_url: TESTNET_RPC_URL.to_string(),
                network_passphrase: TESTNET_PASSPHRASE.to_string(),
                name: Some("Testnet".to_string()),
            },
            Network::Mainnet => NetworkConfig {
                rpc_url: MAINNET_RPC_URL.to_string(),
                network_passphrase: MAINNET_PASSPHRASE.to_string(),
                name: Some("Mainnet".to_string()),
            },
        }
    }
}

impl FromStr for Network {
    type Err = BelugaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "testnet" | "test" => Ok(Network::Testnet),
            "mainnet" | "production" | "public" => Ok(Network::Mainnet),
            other => Err(BelugaError::ConfigurationError(format!(
                "unknown network \"{other}\" (expected testnet or mainnet)"
            ))),
        }
    }
}

/// Remote endpoint and the passphrase identifying the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub network_passphrase: String,
    pub name: Option<String>,
}

impl NetworkConfig {
    pub fn custom(rpc_url: impl Into<String>, network_passphrase: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            network_passphrase: network_passphrase.into(),
            name: None,
        }
    }
}

// SDK CONFIG

/// Configuration accepted by [`crate::BelugaSwapSdk`].
///
/// Either a predefined `network` or both `rpc_url` and `network_passphrase`
/// must be set, never both forms at once.
#[derive(Debug, Clone, Default)]
pub struct BelugaSdkConfig {
    pub factory_address: String,
    pub pool_address: Option<String>,
    pub network: Option<Network>,
    pub rpc_url: Option<String>,
    pub network_passphrase: Option<String>,
}

impl BelugaSdkConfig {
    pub fn new(factory_address: impl Into<String>) -> Self {
        Self {
            factory_address: factory_address.into(),
            ..Default::default()
        }
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    pub fn with_custom_network(
        mut self,
        rpc_url: impl Into<String>,
        network_passphrase: impl Into<String>,
    ) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self.network_passphrase = Some(network_passphrase.into());
        self
    }

    pub fn with_pool(mut self, pool_address: impl Into<String>) -> Self {
        self.pool_address = Some(pool_address.into());
        self
    }

    /// Reads `BELUGA_FACTORY_ADDRESS`, `BELUGA_POOL_ADDRESS`, `BELUGA_NETWORK`,
    /// `BELUGA_RPC_URL` and `BELUGA_NETWORK_PASSPHRASE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let factory_address = read("BELUGA_FACTORY_ADDRESS").ok_or_else(|| {
            BelugaError::ConfigurationError("BELUGA_FACTORY_ADDRESS is not set".to_string())
        })?;

        Ok(Self {
            factory_address,
            pool_address: read("BELUGA_POOL_ADDRESS"),
            network: read("BELUGA_NETWORK").map(|n| n.parse()).transpose()?,
            rpc_url: read("BELUGA_RPC_URL"),
            network_passphrase: read("BELUGA_NETWORK_PASSPHRASE"),
        })
    }

    pub fn resolve_network(&self) -> Result<NetworkConfig> {
        match (self.network, &self.rpc_url, &self.network_passphrase) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(BelugaError::ConfigurationError(
                "provide either a predefined network or a custom rpc url and passphrase, not both"
                    .to_string(),
            )),
            (Some(network), None, None) => Ok(network.config()),
            (None, Some(rpc_url), Some(passphrase)) => {
                Ok(NetworkConfig::custom(rpc_url.clone(), passphrase.clone()))
            }
            _ => Err(BelugaError::ConfigurationError(
                "must provide either a network (testnet/mainnet) or both rpc url and network passphrase"
                    .to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn fee_tier_lookup() {
        let tier = FeeTier::by_name("volatile").unwrap();
        assert_eq!(tier.bps, 30);
        assert_eq!(tier.tick_spacing, 60);
        assert_eq!("EXOTIC".parse::<FeeTierId>().unwrap().tier().tick_spacing, 200);
        assert_eq!(FeeTierId::Stable.tier().bps, 5);
        assert_matches!(FeeTier::by_name("medium"), Err(BelugaError::UnknownFeeTier(name)) if name == "medium");
    }

    #[test]
    fn predefined_networks() {
        let config = BelugaSdkConfig::new("CFACTORY").with_network(Network::Testnet);
        let network = config.resolve_network().unwrap();
        assert_eq!(network.rpc_url, TESTNET_RPC_URL);
        assert_eq!(network.network_passphrase, TESTNET_PASSPHRASE);
        assert_eq!("production".parse::<Network>().unwrap(), Network::Mainnet);
    }

    #[test]
    fn custom_network_needs_both_halves() {
        let full = BelugaSdkConfig::new("CFACTORY").with_custom_network("http://localhost:8000", "Standalone");
        assert_eq!(full.resolve_network().unwrap().name, None);

        let mut half = BelugaSdkConfig::new("CFACTORY");
        half.rpc_url = Some("http://localhost:8000".to_string());
        assert_matches!(half.resolve_network(), Err(BelugaError::ConfigurationError(_)));

        assert_matches!(
            BelugaSdkConfig::new("CFACTORY").resolve_network(),
            Err(BelugaError::ConfigurationError(_))
        );
    }

    #[test]
    fn network_and_custom_endpoint_conflict() {
        let config = BelugaSdkConfig::new("CFACTORY")
            .with_network(Network::Mainnet)
            .with_custom_network("http://localhost:8000", "Standalone");
        assert_matches!(config.resolve_network(), Err(BelugaError::ConfigurationError(_)));
    }

    #[test]
    fn config_from_lookup() {
        let vars = HashMap::from([
            ("BELUGA_FACTORY_ADDRESS", "CFACTORY"),
            ("BELUGA_NETWORK", "testnet"),
            ("BELUGA_POOL_ADDRESS", ""),
        ]);
        let config = BelugaSdkConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.factory_address, "CFACTORY");
        assert_eq!(config.network, Some(Network::Testnet));
        assert_eq!(config.pool_address, None);

        assert_matches!(
            BelugaSdkConfig::from_lookup(|_| None),
            Err(BelugaError::ConfigurationError(_))
        );
    }

    #[test]
    fn malformed_network_name_is_reported() {
        let vars = HashMap::from([
            ("BELUGA_FACTORY_ADDRESS", "CFACTORY"),
            ("BELUGA_NETWORK", "moonnet"),
        ]);
        assert_matches!(
            BelugaSdkConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())),
            Err(BelugaError::ConfigurationError(message)) if message.contains("moonnet")
        );
    }
}
