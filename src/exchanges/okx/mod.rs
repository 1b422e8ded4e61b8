pub mod signer;

pub use signer::OkxSigner;
