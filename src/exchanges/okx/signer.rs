use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{require_passphrase, CONTENT_TYPE, JSON_CONTENT_TYPE};
use crate::core::kernel::{iso8601_millis, Clock, PrehashLayout, Signer};
use crate::core::types::{ExchangeName, Headers, PreparedRequest, RequestSpec};

pub const API_KEY_HEADER: &str = "OK-ACCESS-KEY";
pub const SIGN_HEADER: &str = "OK-ACCESS-SIGN";
pub const TIMESTAMP_HEADER: &str = "OK-ACCESS-TIMESTAMP";
pub const PASSPHRASE_HEADER: &str = "OK-ACCESS-PASSPHRASE";

#[derive(Debug, Clone, Copy, Default)]
pub struct OkxSigner;

impl OkxSigner {
    pub fn new() -> Self {
        Self
    }
}

impl Signer for OkxSigner {
    fn prepare(
        &self,
        request: RequestSpec,
        credentials: &ExchangeConfig,
        clock: &dyn Clock,
    ) -> Result<PreparedRequest, ExchangeError> {
        // OKX requires timestamp in ISO format
        let timestamp = iso8601_millis(clock.now_millis()?)?;
        let layout = PrehashLayout::new(&request)?;

        let mut headers = Headers::new();
        headers.insert(API_KEY_HEADER.to_string(), credentials.api_key().to_string());
        headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());

        if request.signed {
            let passphrase = require_passphrase(credentials, ExchangeName::Okx)?;
            let signature = layout.sign(credentials.secret_key(), &timestamp, &request.method)?;
            headers.insert(SIGN_HEADER.to_string(), signature);
            headers.insert(PASSPHRASE_HEADER.to_string(), passphrase.to_string());
        } else if let Some(passphrase) = credentials.api_passphrase() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::FixedClock;
    use reqwest::Method;

    #[test]
    fn test_timestamp_header_is_iso8601() {
        let config = ExchangeConfig::new("k", "s").passphrase("p");
        let prepared = OkxSigner
            .prepare(
                RequestSpec::new(Method::GET, "/api/v5/account/balance", None, true),
                &config,
                &FixedClock::new(1_700_000_000_000),
            )
            .unwrap();

        assert_eq!(
            prepared.header(TIMESTAMP_HEADER),
            Some("2023-11-14T22:13:20.000Z")
        );
        assert!(prepared.header(SIGN_HEADER).is_some());
        assert_eq!(prepared.header(PASSPHRASE_HEADER), Some("p"));
    }

    #[test]
    fn test_signed_without_passphrase_fails() {
        let config = ExchangeConfig::new("k", "s");
        let result = OkxSigner.prepare(
            RequestSpec::new(Method::GET, "/api/v5/account/balance", None, true),
            &config,
            &FixedClock::new(1_700_000_000_000),
        );

        assert!(matches!(result, Err(ExchangeError::AuthError(_))));
    }

    #[test]
    fn test_unsigned_has_no_signature() {
        let config = ExchangeConfig::new("k", "s");
        let prepared = OkxSigner
            .prepare(
                RequestSpec::new(Method::GET, "/api/v5/public/time", None, false),
                &config,
                &FixedClock::new(1_700_000_000_000),
            )
            .unwrap();

        assert_eq!(prepared.header(SIGN_HEADER), None);
        assert_eq!(prepared.header(API_KEY_HEADER), Some("k"));
        assert_eq!(prepared.header(PASSPHRASE_HEADER), None);
    }
}
