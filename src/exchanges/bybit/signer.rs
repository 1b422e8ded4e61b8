use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{
    build_query_string, hmac_sha256, json_body, CONTENT_TYPE, JSON_CONTENT_TYPE,
};
use crate::core::kernel::{Clock, Signer};
use crate::core::types::{Headers, PreparedRequest, RequestSpec};

pub const API_KEY_HEADER: &str = "X-BAPI-API-KEY";
pub const TIMESTAMP_HEADER: &str = "X-BAPI-TIMESTAMP";
pub const RECV_WINDOW_HEADER: &str = "X-BAPI-RECV-WINDOW";
pub const SIGN_HEADER: &str = "X-BAPI-SIGN";

pub const RECV_WINDOW: &str = "5000";

/// Bybit HMAC-SHA256 signer for the V5 API
#[derive(Debug, Clone, Copy, Default)]
pub struct BybitSigner;

impl BybitSigner {
    pub fn new() -> Self {
        Self
    }

    /// V5 payload: timestamp + api_key + recv_window + (query string | body)
    fn sign_v5(
        credentials: &ExchangeConfig,
        timestamp: &str,
        payload: &str,
    ) -> Result<String, ExchangeError> {
        let message = format!(
            "{}{}{}{}",
            timestamp,
            credentials.api_key(),
            RECV_WINDOW,
            payload
        );
        let signature = hmac_sha256(credentials.secret_key().as_bytes(), message.as_bytes())?;
        Ok(hex::encode(signature))
    }
}

impl Signer for BybitSigner {
    fn prepare(
        &self,
        request: RequestSpec,
        credentials: &ExchangeConfig,
        clock: &dyn Clock,
    ) -> Result<PreparedRequest, ExchangeError> {
        let timestamp = clock.now_millis()?.to_string();

        let (query, body) = if request.is_get() {
            (Some(build_query_string(&request.params)), None)
        } else {
            (None, Some(json_body(&request.params)?))
        };

        let mut headers = Headers::new();
        headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
        headers.insert(API_KEY_HEADER.to_string(), credentials.api_key().to_string());
        headers.insert(RECV_WINDOW_HEADER.to_string(), RECV_WINDOW.to_string());

        if request.signed {
            let payload = query.as_deref().or(body.as_deref()).unwrap_or_default();
            let signature = Self::sign_v5(credentials, &timestamp, payload)?;
            headers.insert(SIGN_HEADER.to_string(), signature);
        }
        headers.insert(TIMESTAMP_HEADER.to_string(), timestamp);

        Ok(PreparedRequest {
            params: request.params,
            headers,
            query: query.filter(|q| !q.is_empty()),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::FixedClock;
    use reqwest::Method;

    #[test]
    fn test_headers_always_present() {
        let config = ExchangeConfig::new("k", "s");
        let prepared = BybitSigner
            .prepare(
                RequestSpec::new(Method::GET, "/v5/market/time", None, false),
                &config,
                &FixedClock::new(1_700_000_000_000),
            )
            .unwrap();

        assert_eq!(prepared.header(API_KEY_HEADER), Some("k"));
        assert_eq!(prepared.header(TIMESTAMP_HEADER), Some("1700000000000"));
        assert_eq!(prepared.header(RECV_WINDOW_HEADER), Some("5000"));
        assert_eq!(prepared.header(SIGN_HEADER), None);
        assert_eq!(prepared.query, None);
    }
}
