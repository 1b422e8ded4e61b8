//! One signer per exchange.
//!
//! OKX, Bitget and KuCoin share the prehash layout in
//! [`crate::core::kernel::PrehashLayout`]; Binance and MEXC share the
//! query-string scheme.

pub mod binance;
pub mod bitget;
pub mod bybit;
pub mod gateio;
pub mod kraken;
pub mod kucoin;
pub mod mexc;
pub mod okx;

pub use binance::BinanceSigner;
pub use bitget::BitgetSigner;
pub use bybit::BybitSigner;
pub use gateio::GateIoSigner;
pub use kraken::KrakenSigner;
pub use kucoin::KucoinSigner;
pub use mexc::MexcSigner;
pub use okx::OkxSigner;
