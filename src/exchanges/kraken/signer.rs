//! Kraken private endpoint signing.
//!
//! 1. SHA256(nonce + POST data)
//! 2. HMAC-SHA512(base64-decoded secret, URI path + step 1)
//! 3. Base64 encode the result

use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{
    hmac_sha512, is_query_method, param_value, CONTENT_TYPE, FORM_CONTENT_TYPE,
};
use crate::core::kernel::{Clock, MonotonicNonce, Signer};
use crate::core::types::{Headers, Params, PreparedRequest, RequestSpec};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::Value;
use sha2::{Digest, Sha256};

pub const API_KEY_HEADER: &str = "API-Key";
pub const SIGN_HEADER: &str = "API-Sign";

/// Kraken signer.
///
/// A caller-supplied `nonce` param is used as is. Otherwise the signer
/// generates one that is strictly greater than any it handed out before.
#[derive(Debug, Default)]
pub struct KrakenSigner {
    nonce: MonotonicNonce,
}

impl KrakenSigner {
    pub fn new() -> Self {
        Self {
            nonce: MonotonicNonce::new(),
        }
    }

    /// Compute the `API-Sign` value
    ///
    /// # Arguments
    /// * `secret` - Base64-encoded API secret
    /// * `path` - URI path, e.g. `/0/private/Balance`
    /// * `nonce` - Nonce included in the POST data
    /// * `post_data` - URL-encoded POST data
    pub fn sign(
        secret: &str,
        path: &str,
        nonce: &str,
        post_data: &str,
    ) -> Result<String, ExchangeError> {
        let secret = BASE64
            .decode(secret)
            .map_err(|e| ExchangeError::AuthError(format!("Invalid base64 secret: {}", e)))?;

        let mut sha256 = Sha256::new();
        sha256.update(nonce.as_bytes());
        sha256.update(post_data.as_bytes());

        let mut message = path.as_bytes().to_vec();
        message.extend_from_slice(&sha256.finalize());

        Ok(BASE64.encode(hmac_sha512(&secret, &message)?))
    }

    fn encode_post_data(params: &Params) -> Result<String, ExchangeError> {
        let pairs: Vec<(&str, String)> = params
            .iter()
            .map(|(k, v)| (k.as_str(), param_value(v)))
            .collect();

        serde_urlencoded::to_string(pairs)
            .map_err(|e| ExchangeError::Other(format!("Failed to encode POST data: {}", e)))
    }
}

impl Signer for KrakenSigner {
    fn prepare(
        &self,
        request: RequestSpec,
        credentials: &ExchangeConfig,
        clock: &dyn Clock,
    ) -> Result<PreparedRequest, ExchangeError> {
        let RequestSpec {
            method,
            endpoint,
            mut params,
            signed,
        } = request;

        let mut headers = Headers::new();
        headers.insert(CONTENT_TYPE.to_string(), FORM_CONTENT_TYPE.to_string());
        headers.insert(API_KEY_HEADER.to_string(), credentials.api_key().to_string());

        if signed && !params.contains_key("nonce") {
            let nonce = self.nonce.next(clock)?;
            params.insert("nonce".to_string(), Value::String(nonce.to_string()));
        }

        let post_data = Self::encode_post_data(&params)?;

        if signed {
            let nonce = params.get("nonce").map(param_value).unwrap_or_default();
            let signature = Self::sign(credentials.secret_key(), &endpoint, &nonce, &post_data)?;
            headers.insert(SIGN_HEADER.to_string(), signature);
        }

        let encoded = (!post_data.is_empty()).then_some(post_data);
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
