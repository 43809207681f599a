use std::{fmt, sync::Arc};

use crate::{
    config::{BelugaSdkConfig, NetworkConfig},
    error::{BelugaError, Result},
    factory::FactoryBuilder,
    ledger::{LedgerClient, OfflineLedger},
    params::GetPoolParams,
    pool::PoolBuilder,
};

pub struct BelugaSwapSdk {
    network: Arc<NetworkConfig>,
    ledger: Arc<dyn LedgerClient>,
    factory: FactoryBuilder,
    pool: Option<PoolBuilder>, // at most one connected pool
}

// the ledger handle is an opaque trait object
impl fmt::Debug for BelugaSwapSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BelugaSwapSdk")
            .field("network", &self.network)
            .field("factory", &self.factory)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl BelugaSwapSdk {
    /// Create a new BelugaSwap SDK instance without a ledger integration.
    ///
    /// Payload builders work fully; anything that needs the ledger fails with
    /// [`BelugaError::Unimplemented`]. Use [`BelugaSwapSdk::with_ledger`] to
    /// wire one in.
    pub fn new(config: BelugaSdkConfig) -> Result<Self> {
        Self::with_ledger(config, Arc::new(OfflineLedger))
    }

    /// Create a new BelugaSwap SDK instance backed by `ledger`
    pub fn with_ledger(config: BelugaSdkConfig, ledger: Arc<dyn LedgerClient>) -> Result<Self> {
        if config.factory_address.trim().is_empty() {
            return Err(BelugaError::ConfigurationError(
                "factory address is required".to_string(),
            ));
        }

        let network = Arc::new(config.resolve_network()?);
        log::info!(
            "BelugaSwap SDK on {} ({}), factory {}",
            network.name.as_deref().unwrap_or("custom network"),
            network.rpc_url,
            config.factory_address
        );

        let factory = FactoryBuilder::new(
            config.factory_address,
            Arc::clone(&ledger),
            Arc::clone(&network),
        );
        let pool = config
            .pool_address
            .map(|address| PoolBuilder::new(address, Arc::clone(&ledger), Arc::clone(&network)));

        Ok(Self {
            network,
            ledger,
            factory,
            pool,
        })
    }

    pub fn factory(&self) -> &FactoryBuilder {
        &self.factory
    }

    /// The connected pool, if any
    pub fn pool(&self) -> Option<&PoolBuilder> {
        self.pool.as_ref()
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn rpc_url(&self) -> &str {
        &self.network.rpc_url
    }

    pub fn network_passphrase(&self) -> &str {
        &self.network.network_passphrase
    }

    pub fn ledger(&self) -> &Arc<dyn LedgerClient> {
        &self.ledger
    }

    /// Connect to a pool by address, replacing any previously connected pool
    pub fn connect_pool(&mut self, pool_address: impl Into<String>) -> &PoolBuilder {
        let pool_address = pool_address.into();
        log::info!("Connecting to pool {}", pool_address);

        self.pool.insert(PoolBuilder::new(
            pool_address,
            Arc::clone(&self.ledger),
            Arc::clone(&self.network),
        ))
    }

    /// Look up a pool through the factory and connect to it
    ///
    /// # Returns
    /// The connected pool, or [`BelugaError::PoolNotFound`] when the factory has
    /// no pool for the pair and fee tier. The previous connection is kept on error.
    pub async fn get_and_connect_pool(&mut self, params: &GetPoolParams) -> Result<&PoolBuilder> {
        match self.factory.get_pool(params).await? {
            Some(address) => Ok(self.connect_pool(address)),
            None => Err(BelugaError::PoolNotFound {
                token_a: params.token_a.clone(),
                token_b: params.token_b.clone(),
                fee_tier: params.fee_tier.name(),
            }),
        }
    }
}
