use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::handle::ExchangeHandle;
use crate::core::kernel::Signer;
use crate::core::types::ExchangeName;
use crate::exchanges::{
    BinanceSigner, BitgetSigner, BybitSigner, GateIoSigner, KrakenSigner, KucoinSigner,
    MexcSigner, OkxSigner,
};
use std::sync::Arc;

/// Factory for creating exchange handles
pub struct ExchangeFactory;

impl ExchangeFactory {
    /// Create a handle for the given exchange
    pub fn create(
        exchange: ExchangeName,
        config: ExchangeConfig,
    ) -> Result<ExchangeHandle, ExchangeError> {
        ExchangeHandle::new(exchange, config)
    }

    /// Create a handle from an exchange identifier such as `"binance"`.
    ///
    /// Fails with [`ExchangeError::UnsupportedProvider`] for anything outside
    /// [`ExchangeName::ALL`].
    pub fn create_from_str(
        exchange: &str,
        config: ExchangeConfig,
    ) -> Result<ExchangeHandle, ExchangeError> {
        Self::create(exchange.parse()?, config)
    }

    /// Signing strategy for an exchange
    pub fn signer_for(exchange: ExchangeName) -> Arc<dyn Signer> {
        match exchange {
            ExchangeName::Binance => Arc::new(BinanceSigner::new()),
            ExchangeName::Okx => Arc::new(OkxSigner::new()),
            ExchangeName::Bitget => Arc::new(BitgetSigner::new()),
            ExchangeName::KuCoin => Arc::new(KucoinSigner::new()),
            ExchangeName::Mexc => Arc::new(MexcSigner::new()),
            ExchangeName::GateIo => Arc::new(GateIoSigner::new()),
            ExchangeName::Bybit => Arc::new(BybitSigner::new()),
            ExchangeName::Kraken => Arc::new(KrakenSigner::new()),
        }
    }

    /// Get available exchange types
    pub fn supported_exchanges() -> Vec<ExchangeName> {
        ExchangeName::ALL.to_vec()
    }
}
