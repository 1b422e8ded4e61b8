use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{Clock, ReqwestTransport, Signer, SystemClock, Transport};
use crate::core::types::{ExchangeName, HttpRequest, Params, PreparedRequest, RequestSpec};
use crate::utils::exchange_factory::ExchangeFactory;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// One configured exchange: credentials, signer and resolved base URL.
///
/// Nothing changes after construction; every call recomputes timestamps and
/// nonces, so a handle can be shared across tasks.
pub struct ExchangeHandle {
    name: ExchangeName,
    config: ExchangeConfig,
    base_url: String,
    signer: Arc<dyn Signer>,
    clock: Arc<dyn Clock>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ExchangeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeHandle")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl ExchangeHandle {
    /// Bind a config to the signer of `name`, using the system clock and a
    /// default reqwest transport.
    ///
    /// The base URL is the config's override if set, otherwise the
    /// exchange default.
    pub fn new(name: ExchangeName, config: ExchangeConfig) -> Result<Self, ExchangeError> {
        let signer = ExchangeFactory::signer_for(name);
        let base_url = config
            .base_url_override()
            .unwrap_or(name.default_base_url())
            .to_string();

        Ok(Self {
            name,
            config,
            base_url,
            signer,
            clock: Arc::new(SystemClock),
            transport: Arc::new(ReqwestTransport::new()?),
        })
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the HTTP transport
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn name(&self) -> ExchangeName {
        self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Sign (or not) a request without sending it
    pub fn prepare_request(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<Params>,
        signed: bool,
    ) -> Result<PreparedRequest, ExchangeError> {
        let request = RequestSpec::new(method, endpoint, params, signed);
        self.signer
            .prepare(request, &self.config, self.clock.as_ref())
    }

    /// Prepare the request and send it through the transport.
    ///
    /// The response body is returned as parsed JSON, without looking at
    /// status or exchange error codes. Signing failures return before any
    /// network call.
    #[instrument(skip(self, params), fields(exchange = %self.name, method = %method, endpoint = %endpoint, signed = signed))]
    pub async fn send_request(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<Params>,
        signed: bool,
    ) -> Result<Value, ExchangeError> {
        let prepared = self.prepare_request(method.clone(), endpoint, params, signed)?;
        let request = HttpRequest::new(method, &self.base_url, endpoint, prepared);

        debug!(url = %request.url, "Sending request");
        self.transport.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let handle = ExchangeHandle::new(
            ExchangeName::Binance,
            ExchangeConfig::new("k", "s"),
        )
        .unwrap();

        assert_eq!(handle.base_url(), "https://api.binance.com");
        assert_eq!(handle.name(), ExchangeName::Binance);
    }

    #[test]
    fn test_base_url_override() {
        let handle = ExchangeHandle::new(
            ExchangeName::Binance,
            ExchangeConfig::new("k", "s").base_url("https://testnet.binance.vision"),
        )
        .unwrap();

        assert_eq!(handle.base_url(), "https://testnet.binance.vision");
    }

    #[test]
    fn test_debug_hides_credentials() {
        let handle = ExchangeHandle::new(
            ExchangeName::Binance,
            ExchangeConfig::new("my_key", "my_secret"),
        )
        .unwrap();

        let debug = format!("{:?}", handle);
        assert!(debug.contains("binance") || debug.contains("Binance"));
        assert!(!debug.contains("my_key"));
        assert!(!debug.contains("my_secret"));
    }

    #[test]
    fn test_signer_follows_exchange_name() {
        let config = ExchangeConfig::new("k", "a2V5").passphrase("p");
        let expected = [
            (ExchangeName::Binance, "X-MBX-APIKEY"),
            (ExchangeName::Okx, "OK-ACCESS-KEY"),
            (ExchangeName::Bitget, "ACCESS-KEY"),
            (ExchangeName::KuCoin, "KC-API-KEY"),
            (ExchangeName::Mexc, "X-MEXC-APIKEY"),
            (ExchangeName::GateIo, "KEY"),
            (ExchangeName::Bybit, "X-BAPI-API-KEY"),
            (ExchangeName::Kraken, "API-Key"),
        ];

        for (name, key_header) in expected {
            let handle = ExchangeHandle::new(name, config.clone()).unwrap();
            let prepared = handle
                .prepare_request(Method::GET, "/private", None, true)
                .unwrap();

            assert_eq!(prepared.header(key_header), Some("k"), "{}", name);
        }
    }
}
