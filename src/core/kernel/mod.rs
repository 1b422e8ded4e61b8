//! Exchange-agnostic plumbing shared by every signer.
//!
//! - [`Signer`]: per-exchange request preparation
//! - [`Clock`]: injectable time source for timestamps and nonces
//! - [`Transport`]: the HTTP collaborator, with [`ReqwestTransport`] as the
//!   default implementation
//!
//! Nothing in here knows about a specific exchange.

pub mod clock;
pub mod rest;
pub mod signer;

pub use clock::{iso8601_millis, Clock, FixedClock, MonotonicNonce, SystemClock};
pub use rest::{ReqwestTransport, RestClientBuilder, RestClientConfig, Transport};
pub use signer::{PrehashLayout, Signer};
