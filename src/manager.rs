use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::handle::ExchangeHandle;
use crate::core::types::{ExchangeName, Params};
use crate::utils::exchange_factory::ExchangeFactory;
use parking_lot::RwLock;
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct ManagerState {
    exchanges: HashMap<ExchangeName, Arc<ExchangeHandle>>,
    last_added: Option<ExchangeName>,
}

/// Routes requests to configured exchanges.
///
/// The most recently added exchange is the default for
/// [`get_exchange(None)`](Self::get_exchange). Entries are only ever added or
/// replaced, never removed. Safe to share between tasks.
#[derive(Debug, Default)]
pub struct CryptoApiManager {
    state: RwLock<ManagerState>,
}

impl CryptoApiManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a handle through the factory and register it, replacing any
    /// handle already stored for that exchange.
    pub fn add_exchange(
        &self,
        exchange: ExchangeName,
        config: ExchangeConfig,
    ) -> Result<&Self, ExchangeError> {
        let handle = ExchangeFactory::create(exchange, config)?;
        Ok(self.add_handle(handle))
    }

    /// Register a pre-built handle under its own exchange name
    pub fn add_handle(&self, handle: ExchangeHandle) -> &Self {
        let exchange = handle.name();
        {
            let mut state = self.state.write();
            state.exchanges.insert(exchange, Arc::new(handle));
            state.last_added = Some(exchange);
        }

        debug!(exchange = %exchange, "Exchange registered");
        self
    }

    /// Look up a handle; `None` means the most recently added exchange
    pub fn get_exchange(
        &self,
        exchange: Option<ExchangeName>,
    ) -> Result<Arc<ExchangeHandle>, ExchangeError> {
        let state = self.state.read();
        let exchange = match exchange {
            Some(exchange) => exchange,
            None => state.last_added.ok_or(ExchangeError::NoExchangeConfigured)?,
        };

        state
            .exchanges
            .get(&exchange)
            .cloned()
            .ok_or(ExchangeError::ExchangeNotAdded(exchange))
    }

    /// Send a request through the handle registered for `exchange`
    pub async fn send_request(
        &self,
        exchange: ExchangeName,
        method: Method,
        endpoint: &str,
        params: Option<Params>,
        signed: bool,
    ) -> Result<Value, ExchangeError> {
        let handle = self.get_exchange(Some(exchange))?;
        handle.send_request(method, endpoint, params, signed).await
    }

    /// Configured exchanges, sorted
    pub fn exchanges(&self) -> Vec<ExchangeName> {
        let mut exchanges: Vec<_> = self.state.read().exchanges.keys().copied().collect();
        exchanges.sort();
        exchanges
    }

    pub fn last_added(&self) -> Option<ExchangeName> {
        self.state.read().last_added
    }

    pub fn len(&self) -> usize {
        self.state.read().exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().exchanges.is_empty()
    }
}
