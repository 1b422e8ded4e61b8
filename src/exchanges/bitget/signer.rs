use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{require_passphrase, CONTENT_TYPE, JSON_CONTENT_TYPE};
use crate::core::kernel::{Clock, PrehashLayout, Signer};
use crate::core::types::{ExchangeName, Headers, PreparedRequest, RequestSpec};

pub const API_KEY_HEADER: &str = "ACCESS-KEY";
pub const SIGN_HEADER: &str = "ACCESS-SIGN";
pub const TIMESTAMP_HEADER: &str = "ACCESS-TIMESTAMP";
pub const PASSPHRASE_HEADER: &str = "ACCESS-PASSPHRASE";

/// Bitget signer: OKX prehash layout with a millisecond timestamp
#[derive(Debug, Clone, Copy, Default)]
pub struct BitgetSigner;

impl BitgetSigner {
    pub fn new() -> Self {
        Self
    }
}

impl Signer for BitgetSigner {
    fn prepare(
        &self,
        request: RequestSpec,
        credentials: &ExchangeConfig,
        clock: &dyn Clock,
    ) -> Result<PreparedRequest, ExchangeError> {
        let timestamp = clock.now_millis()?.to_string();
        let layout = PrehashLayout::new(&request)?;

        let mut headers = Headers::new();
        headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
        headers.insert(API_KEY_HEADER.to_string(), credentials.api_key().to_string());

        if request.signed {
            let passphrase = require_passphrase(credentials, ExchangeName::Bitget)?;
            let signature = layout.sign(credentials.secret_key(), &timestamp, &request.method)?;
            headers.insert(SIGN_HEADER.to_string(), signature);
            headers.insert(PASSPHRASE_HEADER.to_string(), passphrase.to_string());
        }
        headers.insert(TIMESTAMP_HEADER.to_string(), timestamp);

        Ok(PreparedRequest {
            params: request.params,
            headers,
            query: layout.query,
            body: layout.body,
        })
    }
}
