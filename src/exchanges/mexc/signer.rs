use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{
    build_query_string, hmac_sha256, non_empty_query, CONTENT_TYPE, JSON_CONTENT_TYPE,
};
use crate::core::kernel::{Clock, Signer};
use crate::core::types::{Headers, PreparedRequest, RequestSpec};
use serde_json::Value;

pub const API_KEY_HEADER: &str = "X-MEXC-APIKEY";

/// MEXC signer.
///
/// Same query-string scheme as Binance, but every method carries its params
/// in the URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct MexcSigner;

impl MexcSigner {
    pub fn new() -> Self {
        Self
    }
}

impl Signer for MexcSigner {
    fn prepare(
        &self,
        request: RequestSpec,
        credentials: &ExchangeConfig,
        clock: &dyn Clock,
    ) -> Result<PreparedRequest, ExchangeError> {
        let mut params = request.params;

        if request.signed {
            params.insert(
                "timestamp".to_string(),
                Value::String(clock.now_millis()?.to_string()),
            );
            let query_string = build_query_string(&params);
            let signature = hex::encode(hmac_sha256(
                credentials.secret_key().as_bytes(),
                query_string.as_bytes(),
            )?);
            params.insert("signature".to_string(), Value::String(signature));
        }

        let mut headers = Headers::new();
        headers.insert(API_KEY_HEADER.to_string(), credentials.api_key().to_string());
        headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());

        let query = non_empty_query(&params);

        Ok(PreparedRequest {
            params,
            headers,
            query,
            body: None,
        })
    }
}
