use crate::core::errors::ExchangeError;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Request parameters, kept in insertion order.
///
/// Signing schemes that concatenate parameters depend on this order, so it is
/// an ordered map rather than a `HashMap`.
pub type Params = Map<String, Value>;

/// Header map produced by a signer
pub type Headers = HashMap<String, String>;

/// Closed set of supported exchanges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeName {
    Binance,
    Okx,
    Bitget,
    KuCoin,
    Mexc,
    GateIo,
    Bybit,
    Kraken,
}

impl ExchangeName {
    pub const ALL: [Self; 8] = [
        Self::Binance,
        Self::Okx,
        Self::Bitget,
        Self::KuCoin,
        Self::Mexc,
        Self::GateIo,
        Self::Bybit,
        Self::Kraken,
    ];

    /// Production REST endpoint used when the config carries no override
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Binance => "https://api.binance.com",
            Self::Okx => "https://www.okx.com",
            Self::Bitget => "https://api.bitget.com",
            Self::KuCoin => "https://api.kucoin.com",
            Self::Mexc => "https://api.mexc.com",
            Self::GateIo => "https://api.gateio.ws",
            Self::Bybit => "https://api.bybit.com",
            Self::Kraken => "https://api.kraken.com",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binance => "binance",
            Self::Okx => "okx",
            Self::Bitget => "bitget",
            Self::KuCoin => "kucoin",
            Self::Mexc => "mexc",
            Self::GateIo => "gateio",
            Self::Bybit => "bybit",
            Self::Kraken => "kraken",
        }
    }
}

impl fmt::Display for ExchangeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeName {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '.' | '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "binance" => Ok(Self::Binance),
            "okx" => Ok(Self::Okx),
            "bitget" => Ok(Self::Bitget),
            "kucoin" => Ok(Self::KuCoin),
            "mexc" => Ok(Self::Mexc),
            "gateio" | "gate" => Ok(Self::GateIo),
            "bybit" => Ok(Self::Bybit),
            "kraken" => Ok(Self::Kraken),
            _ => Err(ExchangeError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// A single request as issued by the caller, before signing
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub endpoint: String,
    pub params: Params,
    pub signed: bool,
}

impl RequestSpec {
    /// Absent params are treated as an empty map.
    pub fn new(
        method: Method,
        endpoint: impl Into<String>,
        params: Option<Params>,
        signed: bool,
    ) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: params.unwrap_or_default(),
            signed,
        }
    }

    /// Returns true when the method carries no request body on the wire
    pub(crate) fn is_get(&self) -> bool {
        self.method == Method::GET
    }
}

/// Output of a signer: the final params and headers plus the exact query
/// string and body that were signed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedRequest {
    pub params: Params,
    pub headers: Headers,
    /// Encoded query string without the leading `?`
    pub query: Option<String>,
    pub body: Option<String>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Fully resolved request handed to the transport
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Joins base URL, endpoint and the optional encoded query string
    pub fn new(method: Method, base_url: &str, endpoint: &str, prepared: PreparedRequest) -> Self {
        let url = match prepared.query.as_deref() {
            Some(query) if !query.is_empty() => format!("{}{}?{}", base_url, endpoint, query),
            _ => format!("{}{}", base_url, endpoint),
        };

        Self {
            method,
            url,
            headers: prepared.headers,
            body: prepared.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_name_from_str() {
        assert_eq!("BINANCE".parse::<ExchangeName>().unwrap(), ExchangeName::Binance);
        assert_eq!("gate.io".parse::<ExchangeName>().unwrap(), ExchangeName::GateIo);
        assert_eq!("KuCoin".parse::<ExchangeName>().unwrap(), ExchangeName::KuCoin);

        for name in ExchangeName::ALL {
            assert_eq!(name.to_string().parse::<ExchangeName>().unwrap(), name);
        }
    }

    #[test]
    fn test_unknown_exchange_is_unsupported() {
        let err = "FTX".parse::<ExchangeName>().unwrap_err();
        assert!(matches!(err, ExchangeError::UnsupportedProvider(ref name) if name == "FTX"));
    }

    #[test]
    fn test_request_spec_defaults_params() {
        let spec = RequestSpec::new(Method::GET, "/api/v3/time", None, false);
        assert!(spec.params.is_empty());
        assert!(spec.is_get());
    }

    #[test]
    fn test_http_request_url() {
        let prepared = PreparedRequest {
            query: Some("symbol=BTCUSDT".to_string()),
            ..PreparedRequest::default()
        };
        let request =
            HttpRequest::new(Method::GET, "https://api.binance.com", "/api/v3/order", prepared);
        assert_eq!(request.url, "https://api.binance.com/api/v3/order?symbol=BTCUSDT");

        let request = HttpRequest::new(
            Method::POST,
            "https://api.kraken.com",
            "/0/private/Balance",
            PreparedRequest::default(),
        );
        assert_eq!(request.url, "https://api.kraken.com/0/private/Balance");
    }
}
