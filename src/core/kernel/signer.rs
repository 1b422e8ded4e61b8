use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::clock::Clock;
use crate::core::types::{ExchangeName, Params, PreparedRequest, RequestSpec};
use base64::engine::general_purpose;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::Method;
use serde_json::Value;
use sha2::{Sha256, Sha512};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Signer trait for request authentication
///
/// One implementation per exchange. A signer never performs I/O: given the
/// caller's request, the credentials and a clock it returns the parameters,
/// headers, query string and body to put on the wire.
pub trait Signer: Send + Sync {
    /// Prepare a request for sending
    ///
    /// # Arguments
    /// * `request` - Method, endpoint, params and whether to sign
    /// * `credentials` - API key, secret and optional passphrase
    /// * `clock` - Time source for timestamps and nonces
    ///
    /// When `request.signed` is false no signature is computed, but headers
    /// the exchange always expects (API key, timestamp) are still set.
    fn prepare(
        &self,
        request: RequestSpec,
        credentials: &ExchangeConfig,
        clock: &dyn Clock,
    ) -> Result<PreparedRequest, ExchangeError>;
}

pub fn hmac_sha256(secret: &[u8], payload: &[u8]) -> Result<Vec<u8>, ExchangeError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret)
        .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn hmac_sha512(secret: &[u8], payload: &[u8]) -> Result<Vec<u8>, ExchangeError> {
    let mut mac = Hmac::<Sha512>::new_from_slice(secret)
        .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Renders a parameter value the way it appears in a query string:
/// strings without quotes, numbers and booleans as literals, null as empty.
pub fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Builds `k1=v1&k2=v2` in insertion order.
///
/// Values are not percent-encoded; the exchanges using this layout sign the
/// raw concatenation.
pub fn build_query_string(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, param_value(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Same as [`build_query_string`], but `None` for an empty map
pub fn non_empty_query(params: &Params) -> Option<String> {
    if params.is_empty() {
        None
    } else {
        Some(build_query_string(params))
    }
}

/// Compact JSON body in insertion order
pub fn json_body(params: &Params) -> Result<String, ExchangeError> {
    Ok(serde_json::to_string(params)?)
}

/// Methods whose params travel in the URL for form-encoded exchanges
pub fn is_query_method(method: &Method) -> bool {
    *method == Method::GET || *method == Method::DELETE
}

/// Wire layout shared by OKX, Bitget and KuCoin.
///
/// GET params are appended to the request path; any other method sends them
/// as a JSON body. The prehash is `timestamp + METHOD + request_path + body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrehashLayout {
    pub request_path: String,
    pub query: Option<String>,
    pub body: Option<String>,
}

impl PrehashLayout {
    pub fn new(request: &RequestSpec) -> Result<Self, ExchangeError> {
        if request.is_get() {
            let query = non_empty_query(&request.params);
            let request_path = match &query {
                Some(query) => format!("{}?{}", request.endpoint, query),
                None => request.endpoint.clone(),
            };
            Ok(Self {
                request_path,
                query,
                body: None,
            })
        } else {
            let body = if request.params.is_empty() {
                None
            } else {
                Some(json_body(&request.params)?)
            };
            Ok(Self {
                request_path: request.endpoint.clone(),
                query: None,
                body,
            })
        }
    }

    pub fn prehash(&self, timestamp: &str, method: &Method) -> String {
        format!(
            "{}{}{}{}",
            timestamp,
            method.as_str().to_ascii_uppercase(),
            self.request_path,
            self.body.as_deref().unwrap_or_default()
        )
    }

    /// HMAC-SHA256 of the prehash, base64 encoded
    pub fn sign(
        &self,
        secret_key: &str,
        timestamp: &str,
        method: &Method,
    ) -> Result<String, ExchangeError> {
        let prehash = self.prehash(timestamp, method);
        let signature = hmac_sha256(secret_key.as_bytes(), prehash.as_bytes())?;
        Ok(general_purpose::STANDARD.encode(signature))
    }
}

/// Passphrase for the OKX, Bitget and KuCoin signed requests
pub fn require_passphrase<'a>(
    credentials: &'a ExchangeConfig,
    exchange: ExchangeName,
) -> Result<&'a str, ExchangeError> {
    credentials.api_passphrase().ok_or_else(|| {
        ExchangeError::AuthError(format!("{} requires an API passphrase", exchange))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => Params::new(),
        }
    }

    #[test]
    fn test_query_string_keeps_insertion_order() {
        let p = params(json!({"zebra": "1", "alpha": 2, "flag": true}));
        assert_eq!(build_query_string(&p), "zebra=1&alpha=2&flag=true");
        assert_eq!(non_empty_query(&Params::new()), None);
    }

    #[test]
    fn test_param_value_rendering() {
        assert_eq!(param_value(&json!("BTCUSDT")), "BTCUSDT");
        assert_eq!(param_value(&json!(1.25)), "1.25");
        assert_eq!(param_value(&json!(null)), "");
    }

    #[test]
    fn test_json_body_is_compact() {
        let p = params(json!({"symbol": "BTCUSDT", "side": "buy"}));
        assert_eq!(json_body(&p).unwrap(), r#"{"symbol":"BTCUSDT","side":"buy"}"#);
    }

    #[test]
    fn test_hmac_sha256_known_vector() {
        // Binance API documentation example
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        let signature = hmac_sha256(
            b"NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j",
            query.as_bytes(),
        )
        .unwrap();

        assert_eq!(
            hex::encode(signature),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_prehash_layout_get_uses_query() {
        let request = RequestSpec::new(
            Method::GET,
            "/api/v5/account/balance",
            Some(params(json!({"ccy": "BTC"}))),
            true,
        );
        let layout = PrehashLayout::new(&request).unwrap();

        assert_eq!(layout.request_path, "/api/v5/account/balance?ccy=BTC");
        assert_eq!(layout.query.as_deref(), Some("ccy=BTC"));
        assert_eq!(layout.body, None);
        assert_eq!(
            layout.prehash("1700000000000", &Method::GET),
            "1700000000000GET/api/v5/account/balance?ccy=BTC"
        );
    }

    #[test]
    fn test_prehash_layout_post_uses_json() {
        let request = RequestSpec::new(
            Method::POST,
            "/api/v5/trade/order",
            Some(params(json!({"instId": "BTC-USDT"}))),
            true,
        );
        let layout = PrehashLayout::new(&request).unwrap();

        assert_eq!(layout.body.as_deref(), Some(r#"{"instId":"BTC-USDT"}"#));
        assert_eq!(
            layout.prehash("ts", &Method::POST),
            r#"tsPOST/api/v5/trade/order{"instId":"BTC-USDT"}"#
        );
    }

    #[test]
    fn test_prehash_layout_empty_params() {
        let request = RequestSpec::new(Method::POST, "/api/v1/orders", None, true);
        let layout = PrehashLayout::new(&request).unwrap();

        assert_eq!(layout.body, None);
        assert_eq!(layout.prehash("1", &Method::POST), "1POST/api/v1/orders");
    }

    #[test]
    fn test_require_passphrase() {
        let without = ExchangeConfig::new("k", "s");
        let err = require_passphrase(&without, ExchangeName::Bitget).unwrap_err();
        assert!(matches!(err, ExchangeError::AuthError(ref msg) if msg.contains("bitget")));

        let with = ExchangeConfig::new("k", "s").passphrase("p");
        assert_eq!(require_passphrase(&with, ExchangeName::Okx).unwrap(), "p");
    }
}
