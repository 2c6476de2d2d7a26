use crate::prelude::*;
use domain_checker_core::error::LookupError;
use domain_checker_core::whois::{parse_whois_response, WhoisRecord};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// WhoisXML API configuration
///
/// Built once at startup and handed to the lookup orchestrator, so nothing
/// downstream reads the environment.
#[derive(Clone)]
pub struct WhoisConfig {
    pub api_key: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl WhoisConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keep the key out of debug output and logs.
impl std::fmt::Debug for WhoisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhoisConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP client for the WhoisXML `WhoisService` endpoint
#[derive(Debug, Clone)]
pub struct WhoisClient {
    http: reqwest::Client,
    config: WhoisConfig,
}

impl WhoisClient {
    pub fn new(config: WhoisConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("domain-checker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self { http, config })
    }

    /// Fetch the WHOIS record for `domain`
    ///
    /// Transport failures, timeouts and non-2xx statuses are
    /// [`LookupError::UpstreamUnavailable`]; unparseable bodies are
    /// [`LookupError::UpstreamMalformed`].
    pub async fn fetch_record(&self, domain: &str) -> Result<WhoisRecord, LookupError> {
        log::debug!("Querying {} for {}", self.config.api_url, domain);

        let response = self
            .http
            .get(&self.config.api_url)
            .query(&[
                ("apiKey", self.config.api_key.as_str()),
                ("domainName", domain),
                ("outputFormat", "JSON"),
            ])
            .send()
            .await
            // The request URL carries the API key.
            .map_err(|e| LookupError::UpstreamUnavailable(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::UpstreamUnavailable(f!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::UpstreamUnavailable(e.without_url().to_string()))?;

        parse_whois_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SERVICE_PATH: &str = "/whoisserver/WhoisService";

    fn create_client(server: &MockServer) -> WhoisClient {
        let config = WhoisConfig::new("test-key").with_api_url(f!("{}{SERVICE_PATH}", server.uri()));
        WhoisClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_record_sends_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SERVICE_PATH))
            .and(query_param("apiKey", "test-key"))
            .and(query_param("domainName", "example.com"))
            .and(query_param("outputFormat", "JSON"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"WhoisRecord": {"domainName": "example.com"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let record = create_client(&server).fetch_record("example.com").await.unwrap();
        assert_eq!(record.domain_name.as_deref(), Some("example.com"));
    }

    #[tokio::test]
    async fn test_fetch_record_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("ApiKey authenticate failed"))
            .mount(&server)
            .await;

        let err = create_client(&server).fetch_record("example.com").await.unwrap_err();
        assert_eq!(err, LookupError::UpstreamUnavailable("HTTP 403 Forbidden".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_record_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = create_client(&server).fetch_record("example.com").await.unwrap_err();
        assert!(matches!(err, LookupError::UpstreamMalformed(_)));
    }

    #[tokio::test]
    async fn test_fetch_record_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"WhoisRecord": {}}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let config = WhoisConfig::new("test-key")
            .with_api_url(f!("{}{SERVICE_PATH}", server.uri()))
            .with_timeout(Duration::from_millis(100));
        let client = WhoisClient::new(config).unwrap();

        let err = client.fetch_record("example.com").await.unwrap_err();
        assert!(matches!(err, LookupError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_fetch_record_unreachable_does_not_leak_key() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = WhoisConfig::new("secret-key").with_api_url(f!("http://{addr}{SERVICE_PATH}"));
        let client = WhoisClient::new(config).unwrap();

        let err = client.fetch_record("example.com").await.unwrap_err();
        assert!(matches!(err, LookupError::UpstreamUnavailable(_)));
        assert!(!err.to_string().contains("secret-key"));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = WhoisConfig::new("secret-key");
        let debug = f!("{config:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains(DEFAULT_API_URL));
    }
}
