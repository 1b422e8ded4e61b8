pub mod signer;

pub use signer::KrakenSigner;
