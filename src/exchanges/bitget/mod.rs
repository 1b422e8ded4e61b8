pub mod signer;

pub use signer::BitgetSigner;
