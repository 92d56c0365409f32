use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::credentials::Credentials;
use crate::endpoints::{Access, Endpoint};
use crate::error::{ErrorKind, SdkError, SdkResult};
use crate::logger::{LogPolicy, Logger};
use crate::models::Envelope;
use crate::params::ApiParams;
use crate::signing::{sign_request, NonceSource};

pub const DEFAULT_API_URL: &str = "https://api.kraken.com";
pub const API_VERSION: &str = "0";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// REST API client for the exchange
#[derive(Clone)]
pub struct KrakenClient {
    base_url: String,
    client: Client,
    credentials: Option<Credentials>,
    nonce: Arc<NonceSource>,
    logger: Arc<dyn Logger>,
    policy: LogPolicy,
}

impl KrakenClient {
    /// Create a new client with the given base URL
    pub fn new(base_url: impl Into<String>, logger: Arc<dyn Logger>) -> SdkResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("clikraken/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            credentials: None,
            nonce: Arc::new(NonceSource::new()),
            logger,
            policy: LogPolicy::standard(),
        })
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_policy(mut self, policy: LogPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policy(&self) -> LogPolicy {
        self.policy
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    // ===== Raw Calls =====

    /// Call a public method
    pub async fn query_public(&self, method: &str, params: &ApiParams) -> SdkResult<Envelope> {
        let url = self.method_url(Access::Public, method);
        self.post_form(&url, params.encode(), None).await
    }

    /// Call a private method, signing the request
    pub async fn query_private(&self, method: &str, params: &ApiParams) -> SdkResult<Envelope> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(SdkError::MissingCredentials)?;

        let path = self.method_path(Access::Private, method);
        let nonce = self.nonce.next();
        let body = params.encode_with_nonce(nonce);
        let signature = sign_request(&path, nonce, &body, credentials.secret())?;

        let url = format!("{}{}", self.base_url, path);
        self.post_form(&url, body, Some((credentials.api_key(), signature)))
            .await
    }

    pub async fn query(
        &self,
        access: Access,
        method: &str,
        params: &ApiParams,
    ) -> SdkResult<Envelope> {
        match access {
            Access::Public => self.query_public(method, params).await,
            Access::Private => self.query_private(method, params).await,
        }
    }

    // ===== Logged Calls =====

    /// Call a method and report every failure through the logger.
    ///
    /// Only [`SdkError::MissingCredentials`] is returned. Transport and
    /// decoding failures are logged according to the policy and produce an
    /// empty envelope. Each error code of the envelope is logged on its own.
    pub async fn query_logged(
        &self,
        access: Access,
        method: &str,
        params: &ApiParams,
    ) -> SdkResult<Envelope> {
        self.logger
            .debug(&format!("{} {} {}", access, method, params.encode()));

        let envelope = match self.query(access, method, params).await {
            Ok(envelope) => envelope,
            Err(SdkError::MissingCredentials) => return Err(SdkError::MissingCredentials),
            Err(e) => {
                self.report_failure(&e);
                Envelope::empty()
            }
        };

        for code in &envelope.error {
            self.logger.log(self.policy.api_error_level(code), code);
        }

        Ok(envelope)
    }

    /// Call an endpoint, see [`KrakenClient::query_logged`]
    pub async fn call(&self, endpoint: Endpoint, params: &ApiParams) -> SdkResult<Envelope> {
        self.query_logged(endpoint.access(), endpoint.method(), params)
            .await
    }

    fn report_failure(&self, error: &SdkError) {
        match error.kind() {
            ErrorKind::Network => {
                let level = self.policy.network_error_level();
                self.logger
                    .log(level, "Network error while querying Kraken API!");
                self.logger.log(level, &error.to_string());
            }
            ErrorKind::Value => {
                if let Some(level) = self.policy.value_error_level() {
                    self.logger.log(
                        level,
                        &format!("ValueError while querying Kraken API! {}", error),
                    );
                }
            }
            ErrorKind::Credentials | ErrorKind::Other => {
                self.logger
                    .error(&format!("Exception while querying Kraken API! {}", error));
            }
        }
    }

    // ===== Internal Helper Methods =====

    fn method_path(&self, access: Access, method: &str) -> String {
        format!("/{}/{}/{}", API_VERSION, access, method)
    }

    fn method_url(&self, access: Access, method: &str) -> String {
        format!("{}{}", self.base_url, self.method_path(access, method))
    }

    async fn post_form(
        &self,
        url: &str,
        body: String,
        auth: Option<(&str, String)>,
    ) -> SdkResult<Envelope> {
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);

        if let Some((key, signature)) = auth {
            request = request.header("API-Key", key).header("API-Sign", signature);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SdkError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for KrakenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("policy", &self.policy)
            .finish()
    }
}
