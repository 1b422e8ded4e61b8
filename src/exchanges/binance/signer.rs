use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{
    build_query_string, hmac_sha256, is_query_method, CONTENT_TYPE, FORM_CONTENT_TYPE,
};
use crate::core::kernel::{Clock, Signer};
use crate::core::types::{Headers, PreparedRequest, RequestSpec};
use serde_json::Value;

pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Binance HMAC-SHA256 signer.
///
/// Signed requests get a `timestamp` param, then a hex `signature` of the
/// whole query string appended as the last param.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinanceSigner;

impl BinanceSigner {
    pub fn new() -> Self {
        Self
    }

    fn generate_signature(secret_key: &str, query_string: &str) -> Result<String, ExchangeError> {
        Ok(hex::encode(hmac_sha256(
            secret_key.as_bytes(),
            query_string.as_bytes(),
        )?))
    }
}

impl Signer for BinanceSigner {
    fn prepare(
        &self,
        request: RequestSpec,
        credentials: &ExchangeConfig,
        clock: &dyn Clock,
    ) -> Result<PreparedRequest, ExchangeError> {
        let RequestSpec {
            method,
            mut params,
            signed,
            ..
        } = request;

        if signed {
            params.insert("timestamp".to_string(), Value::from(clock.now_millis()?));
            let query_string = build_query_string(&params);
            let signature = Self::generate_signature(credentials.secret_key(), &query_string)?;
            params.insert("signature".to_string(), Value::String(signature));
        }

        let mut headers = Headers::new();
        headers.insert(API_KEY_HEADER.to_string(), credentials.api_key().to_string());
        headers.insert(CONTENT_TYPE.to_string(), FORM_CONTENT_TYPE.to_string());

        let encoded = (!params.is_empty()).then(|| build_query_string(&params));
        let (query, body) = if is_query_method(&method) {
            (encoded, None)
        } else {
            (None, encoded)
        };

        Ok(PreparedRequest {
            params,
            headers,
            query,
            body,
        })
    }
}
