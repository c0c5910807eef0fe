//! SendPigeon async client implementation.

use crate::models::{
    ApiKey, ApiKeyWithSecret, CreateApiKeyRequest, CreateDomainRequest, CreateTemplateRequest,
    DomainListItem, DomainVerificationResult, DomainWithDnsRecords, SendBatchEmailRequest,
    SendBatchEmailResponse, SendEmailRequest, SendEmailResponse, SendOptions, Template,
    UpdateTemplateRequest,
};
use crate::{Error, Result};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Async client for the SendPigeon transactional email API.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] for custom
/// settings like an alternate deployment URL or a proxy. The client is
/// stateless apart from its credential and base URL; every call is one
/// independent HTTP round trip, and concurrent calls through the same
/// instance do not affect each other.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    proxy: Option<String>,
    user_agent: String,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a new SendPigeon client with default settings.
    ///
    /// Talks to the production API at `https://api.sendpigeon.dev`.
    ///
    /// # Examples
    /// ```no_run
    /// # use sendpigeon::Client;
    /// # fn main() -> Result<(), sendpigeon::Error> {
    /// let client = Client::new("sp_live_abc123")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Get the base URL this client sends requests to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the proxy URL if one was configured.
    ///
    /// Returns `None` when no proxy was set on the builder.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Send a single email.
    ///
    /// # Arguments
    /// * `email` - The email to send; the sender domain must be verified
    ///
    /// # Returns
    /// The accepted email's id and delivery status
    ///
    /// # Examples
    /// ```no_run
    /// # use sendpigeon::{Client, SendEmailRequest};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), sendpigeon::Error> {
    /// let client = Client::new("sp_live_abc123")?;
    /// let response = client
    ///     .send(&SendEmailRequest {
    ///         from: "Acme <hello@acme.com>".to_string(),
    ///         to: "user@example.com".into(),
    ///         subject: Some("Welcome!".to_string()),
    ///         html: Some("<p>Hello</p>".to_string()),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// println!("queued as {}", response.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send(&self, email: &SendEmailRequest) -> Result<SendEmailResponse> {
        self.send_with_options(email, &SendOptions::default()).await
    }

    /// Send a single email with per-call options.
    ///
    /// When [`SendOptions::idempotency_key`] is set it is forwarded as the
    /// `idempotency-key` header, letting the service deduplicate retried
    /// sends. No deduplication happens client-side.
    ///
    /// # Examples
    /// ```no_run
    /// # use sendpigeon::{Client, SendEmailRequest, SendOptions};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), sendpigeon::Error> {
    /// # let client = Client::new("sp_live_abc123")?;
    /// # let email = SendEmailRequest::default();
    /// let options = SendOptions {
    ///     idempotency_key: Some("order-1234".to_string()),
    /// };
    /// let response = client.send_with_options(&email, &options).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_with_options(
        &self,
        email: &SendEmailRequest,
        options: &SendOptions,
    ) -> Result<SendEmailResponse> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &options.idempotency_key {
            if let Ok(value) = HeaderValue::from_str(key) {
                headers.insert("idempotency-key", value);
            }
        }

        self.request_json(Method::POST, "/v1/emails", Some(email), headers)
            .await
    }

    /// Send up to 100 emails in one request.
    ///
    /// Entries succeed or fail independently; inspect
    /// [`SendBatchEmailResponse::data`] for per-email outcomes. The 1-100
    /// bound is enforced by the service, not the client.
    pub async fn send_batch(
        &self,
        batch: &SendBatchEmailRequest,
    ) -> Result<SendBatchEmailResponse> {
        self.request_json(Method::POST, "/v1/emails/batch", Some(batch), HeaderMap::new())
            .await
    }

    /// Operations on already-submitted emails.
    pub fn emails(&self) -> Emails<'_> {
        Emails { client: self }
    }

    /// Template management operations.
    pub fn templates(&self) -> Templates<'_> {
        Templates { client: self }
    }

    /// Sending-domain management operations.
    pub fn domains(&self) -> Domains<'_> {
        Domains { client: self }
    }

    /// API key management operations.
    pub fn api_keys(&self) -> ApiKeys<'_> {
        ApiKeys { client: self }
    }

    /// Perform one request and hand back the raw successful response.
    ///
    /// Every failure mode terminates here: transport errors become
    /// [`Error::Network`], non-2xx statuses become [`Error::Api`] with a
    /// message pulled from the body. One attempt, no retries.
    async fn dispatch<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        extra_headers: HeaderMap,
    ) -> Result<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, path, "dispatching API request");

        let mut headers = self.headers();
        // Caller headers win on a name collision.
        headers.extend(extra_headers);

        let mut request = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            warn!(status = status.as_u16(), %message, "API request failed");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    /// Request helper for endpoints that answer with a JSON body.
    async fn request_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        extra_headers: HeaderMap,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.dispatch(method, path, body, extra_headers).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// Request helper for endpoints that answer 204 with no body.
    async fn request_unit(&self, method: Method, path: &str) -> Result<()> {
        self.dispatch(method, path, None::<&()>, HeaderMap::new())
            .await?;
        Ok(())
    }

    /// Build headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, value);
        }
        if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, value);
        }
        headers
    }
}

/// Extract a human-readable message from an error response body.
///
/// Falls back to `Request failed: <status>` when the body is not JSON or
/// carries no `message` field.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status().as_u16();
    let fallback = format!("Request failed: {status}");

    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}

/// Operations on emails after submission.
#[derive(Debug, Clone, Copy)]
pub struct Emails<'a> {
    client: &'a Client,
}

impl Emails<'_> {
    /// Cancel a scheduled email before the service sends it.
    ///
    /// Fails with a 409 [`Error::Api`] when the email is not scheduled.
    pub async fn cancel_schedule(&self, id: &str) -> Result<()> {
        self.client
            .request_unit(Method::DELETE, &format!("/v1/emails/{id}/schedule"))
            .await
    }
}

/// Template management operations.
///
/// Obtained from [`Client::templates`].
#[derive(Debug, Clone, Copy)]
pub struct Templates<'a> {
    client: &'a Client,
}

impl Templates<'_> {
    /// List all templates.
    ///
    /// # Examples
    /// ```no_run
    /// # use sendpigeon::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), sendpigeon::Error> {
    /// let client = Client::new("sp_live_abc123")?;
    /// for template in client.templates().list().await? {
    ///     println!("{}: {}", template.id, template.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(&self) -> Result<Vec<Template>> {
        self.client
            .request_json(Method::GET, "/v1/templates", None::<&()>, HeaderMap::new())
            .await
    }

    /// Create a template with `{{variable}}` placeholders.
    pub async fn create(&self, template: &CreateTemplateRequest) -> Result<Template> {
        self.client
            .request_json(Method::POST, "/v1/templates", Some(template), HeaderMap::new())
            .await
    }

    /// Fetch a template by id.
    pub async fn get(&self, id: &str) -> Result<Template> {
        self.client
            .request_json(
                Method::GET,
                &format!("/v1/templates/{id}"),
                None::<&()>,
                HeaderMap::new(),
            )
            .await
    }

    /// Update a template. Unset fields keep their current values.
    pub async fn update(&self, id: &str, changes: &UpdateTemplateRequest) -> Result<Template> {
        self.client
            .request_json(
                Method::PATCH,
                &format!("/v1/templates/{id}"),
                Some(changes),
                HeaderMap::new(),
            )
            .await
    }

    /// Delete a template.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .request_unit(Method::DELETE, &format!("/v1/templates/{id}"))
            .await
    }
}

/// Sending-domain management operations.
///
/// Obtained from [`Client::domains`].
#[derive(Debug, Clone, Copy)]
pub struct Domains<'a> {
    client: &'a Client,
}

impl Domains<'_> {
    /// List all registered domains.
    pub async fn list(&self) -> Result<Vec<DomainListItem>> {
        self.client
            .request_json(Method::GET, "/v1/domains", None::<&()>, HeaderMap::new())
            .await
    }

    /// Register a domain for sending.
    ///
    /// # Arguments
    /// * `name` - The domain name, e.g. `mail.example.com`
    ///
    /// # Returns
    /// The created domain together with the DNS records to publish
    pub async fn create(&self, name: &str) -> Result<DomainWithDnsRecords> {
        let request = CreateDomainRequest {
            name: name.to_string(),
        };
        self.client
            .request_json(Method::POST, "/v1/domains", Some(&request), HeaderMap::new())
            .await
    }

    /// Fetch a domain and its required DNS records.
    pub async fn get(&self, id: &str) -> Result<DomainWithDnsRecords> {
        self.client
            .request_json(
                Method::GET,
                &format!("/v1/domains/{id}"),
                None::<&()>,
                HeaderMap::new(),
            )
            .await
    }

    /// Trigger a DNS verification check.
    ///
    /// # Examples
    /// ```no_run
    /// # use sendpigeon::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), sendpigeon::Error> {
    /// let client = Client::new("sp_live_abc123")?;
    /// let result = client.domains().verify("dom_abc123").await?;
    /// if !result.verification.verified {
    ///     println!("dkim found: {}", result.verification.dkim.found);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn verify(&self, id: &str) -> Result<DomainVerificationResult> {
        self.client
            .request_json(
                Method::POST,
                &format!("/v1/domains/{id}/verify"),
                None::<&()>,
                HeaderMap::new(),
            )
            .await
    }

    /// Remove a domain.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .request_unit(Method::DELETE, &format!("/v1/domains/{id}"))
            .await
    }
}

/// API key management operations.
///
/// Obtained from [`Client::api_keys`].
#[derive(Debug, Clone, Copy)]
pub struct ApiKeys<'a> {
    client: &'a Client,
}

impl ApiKeys<'_> {
    /// List all API keys. Secrets are never returned here.
    pub async fn list(&self) -> Result<Vec<ApiKey>> {
        self.client
            .request_json(Method::GET, "/v1/api-keys", None::<&()>, HeaderMap::new())
            .await
    }

    /// Create an API key.
    ///
    /// The response carries the plaintext secret; the service returns it
    /// exactly once, so store it immediately.
    pub async fn create(&self, request: &CreateApiKeyRequest) -> Result<ApiKeyWithSecret> {
        self.client
            .request_json(Method::POST, "/v1/api-keys", Some(request), HeaderMap::new())
            .await
    }

    /// Revoke an API key.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .request_unit(Method::DELETE, &format!("/v1/api-keys/{id}"))
            .await
    }
}

const DEFAULT_BASE_URL: &str = "https://api.sendpigeon.dev";
const USER_AGENT_VALUE: &str = concat!("sendpigeon-rust/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring a SendPigeon client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Production base URL (`https://api.sendpigeon.dev`)
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    /// - Default user agent
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
        }
    }

    /// Override the base URL, without a trailing slash.
    ///
    /// Useful for pointing the client at a staging deployment or a local
    /// mock server in tests.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    ///
    /// No network traffic happens here; the first request is issued by the
    /// first operation called on the client.
    ///
    /// # Examples
    /// ```no_run
    /// # use sendpigeon::Client;
    /// # fn main() -> Result<(), sendpigeon::Error> {
    /// let client = Client::builder("sp_test_abc123")
    ///     .base_url("http://localhost:8787")
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;

        Ok(Client {
            http,
            api_key: self.api_key,
            base_url: self.base_url,
            proxy: self.proxy,
            user_agent: self.user_agent,
        })
    }
}
