//! # SendPigeon Client
//! Asynchronous wrapper around the SendPigeon transactional email HTTP API, providing typed methods to send email, manage templates, domains, and API keys from Rust using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers sending transactional email from services, jobs, or CLIs without hand-rolling HTTP calls: construct a [`Client`] with an API key, send single or batch emails ([`SendEmailRequest`], [`BatchEmailEntry`]), and manage templates, sending domains, and API keys through the resource groups on the client.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`, so ensure the chosen Tokio features (`rt-multi-thread` or `current_thread`) are available in your application.
//!
//! ## Out of scope
//! Not a mail server or SMTP library. The client performs one best-effort HTTP round trip per call: no queuing, retries, backoff, or caching. Retry policy, if any, belongs to the caller; the `idempotency-key` header makes server-side deduplication of retried sends safe.
//!
//! ## Errors
//! All operations return the crate-wide [`Result`] alias. Transport failures surface as [`Error::Network`], non-2xx statuses as [`Error::Api`] with the HTTP status and the service's message, and malformed success bodies as [`Error::Json`].
//!
//! ## Example
//! ```no_run
//! use sendpigeon::{Client, SendEmailRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sendpigeon::Error> {
//!     let client = Client::new("sp_live_abc123")?;
//!
//!     let response = client
//!         .send(&SendEmailRequest {
//!             from: "Acme <hello@acme.com>".to_string(),
//!             to: "user@example.com".into(),
//!             subject: Some("Welcome!".to_string()),
//!             html: Some("<p>Hello</p>".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Sent: {} ({:?})", response.id, response.status);
//!
//!     for template in client.templates().list().await? {
//!         println!("Template: {}", template.name);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;

pub use client::{ApiKeys, Client, ClientBuilder, Domains, Emails, Templates};
pub use error::Error;
pub use models::{
    ApiKey, ApiKeyDomainRef, ApiKeyMode, ApiKeyPermission, ApiKeyWithSecret, AttachmentInput,
    BatchEmailEntry, BatchEmailResult, BatchError, BatchSummary, CreateApiKeyRequest,
    CreateDomainRequest, CreateTemplateRequest, DnsRecord, DnsRecordKey, DnsRecordType, Domain,
    DomainListItem, DomainStatus, DomainVerificationResult, DomainWithDnsRecords, EmailStatus,
    InboundMode, Recipients, RecordStatus, SendBatchEmailRequest, SendBatchEmailResponse,
    SendEmailRequest, SendEmailResponse, SendOptions, Template, TemplateDomain,
    UpdateTemplateRequest, VerificationStatus,
};

/// Result type alias for SendPigeon operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
