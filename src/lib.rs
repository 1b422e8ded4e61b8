//! Signed REST access to multiple cryptocurrency exchanges through one
//! interface.
//!
//! ```rust,no_run
//! use cexsign::{CryptoApiManager, ExchangeConfig, ExchangeName};
//! use reqwest::Method;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), cexsign::ExchangeError> {
//! let manager = CryptoApiManager::new();
//! manager
//!     .add_exchange(ExchangeName::Binance, ExchangeConfig::new("key", "secret"))?
//!     .add_exchange(
//!         ExchangeName::Okx,
//!         ExchangeConfig::new("key", "secret").passphrase("passphrase"),
//!     )?;
//!
//! let params = json!({"symbol": "BTCUSDT"}).as_object().cloned();
//! let account = manager
//!     .send_request(ExchangeName::Binance, Method::GET, "/api/v3/account", params, true)
//!     .await?;
//! println!("{}", account);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod exchanges;
pub mod manager;
pub mod utils;

pub use crate::core::config::ExchangeConfig;
pub use crate::core::errors::ExchangeError;
pub use crate::core::handle::ExchangeHandle;
pub use crate::core::kernel::{Clock, FixedClock, Signer, SystemClock, Transport};
pub use crate::core::types::*;
pub use crate::manager::CryptoApiManager;
pub use crate::utils::exchange_factory::ExchangeFactory;
