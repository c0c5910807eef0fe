//! Wire types for the SendPigeon REST API.
//!
//! Request bodies serialize with the field names the service expects
//! (camelCase, except `scheduled_at`); response bodies deserialize from the
//! documented schema. The client passes these payloads through without
//! interpreting them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One or more recipient addresses.
///
/// The API accepts either a single address string or an array of addresses
/// for `to`, `cc`, and `bcc`; this serializes to whichever form it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Default for Recipients {
    fn default() -> Self {
        Recipients::One(String::new())
    }
}

impl From<String> for Recipients {
    fn from(address: String) -> Self {
        Recipients::One(address)
    }
}

impl From<&str> for Recipients {
    fn from(address: &str) -> Self {
        Recipients::One(address.to_string())
    }
}

impl From<Vec<String>> for Recipients {
    fn from(addresses: Vec<String>) -> Self {
        Recipients::Many(addresses)
    }
}

/// File attachment for an outgoing email.
///
/// Provide either `content` (base64) or `path` (an HTTPS URL the service
/// fetches). `content_type` is inferred from the filename when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentInput {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Body for `POST /v1/emails`.
///
/// `subject` plus `html`/`text`, or `template_id` with `variables`, must be
/// supplied; the sender domain must be verified. The client does not check
/// either rule, the service does.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    /// Sender address, `email@domain.com` or `Name <email@domain.com>`.
    pub from: String,
    pub to: Recipients,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Recipients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Recipients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Template to render instead of `subject`/`html`/`text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Values substituted into `{{variable}}` placeholders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentInput>>,
    /// ISO 8601 send time, at most 30 days ahead. Omit to send immediately.
    #[serde(rename = "scheduled_at", skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

/// Per-call options for [`Client::send_with_options`](crate::Client::send_with_options).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Forwarded as the `idempotency-key` header so the service can
    /// deduplicate retried sends. No header is sent when `None`.
    pub idempotency_key: Option<String>,
}

/// Delivery state of an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    Scheduled,
    Cancelled,
    Pending,
    Sent,
    Delivered,
    Bounced,
    Complained,
    Failed,
}

/// Response from `POST /v1/emails`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SendEmailResponse {
    pub id: String,
    pub status: EmailStatus,
    /// Present only when the email was scheduled rather than sent.
    pub scheduled_at: Option<String>,
    /// Recipients dropped because they previously bounced or complained.
    pub suppressed: Option<Vec<String>>,
}

/// One email within a batch request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEmailEntry {
    pub from: String,
    pub to: Recipients,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Recipients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Recipients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentInput>>,
    /// Per-entry deduplication key, unlike the header used for single sends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    #[serde(rename = "scheduled_at", skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

/// Body for `POST /v1/emails/batch`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendBatchEmailRequest {
    /// Emails to send; the service accepts between 1 and 100 per request.
    pub emails: Vec<BatchEmailEntry>,
}

/// Failure detail for one email in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchError {
    pub code: String,
    pub message: String,
}

/// Outcome of one email in a batch, discriminated by the `status` field.
///
/// Entries succeed or fail independently; a batch response mixes both.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchEmailResult {
    Sent {
        /// Position in the request's `emails` array.
        index: usize,
        id: String,
        suppressed: Option<Vec<String>>,
    },
    Error {
        index: usize,
        error: BatchError,
    },
}

/// Aggregate counts for a batch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Response from `POST /v1/emails/batch`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SendBatchEmailResponse {
    pub data: Vec<BatchEmailResult>,
    pub summary: BatchSummary,
}

/// Domain a template is scoped to; templates without one are org-wide.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateDomain {
    pub id: String,
    pub name: String,
}

/// A reusable email template with `{{variable}}` placeholders.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    /// Variable names detected by the service in the subject and bodies.
    pub variables: Vec<String>,
    pub domain: Option<TemplateDomain>,
    pub created_at: String,
    pub updated_at: String,
}

/// Body for `POST /v1/templates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    /// Unique template identifier (lowercase, dashes allowed).
    pub name: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Scope the template to a domain; omit for org-wide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
}

/// Body for `PATCH /v1/templates/{id}`.
///
/// The nullable fields use a double `Option`: `None` leaves the field
/// untouched, `Some(None)` clears it on the server, `Some(Some(..))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<Option<String>>,
}

/// Verification state of a sending domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    Pending,
    Verified,
    TemporaryFailure,
    Failed,
}

/// A sending domain registered with the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub status: DomainStatus,
    pub verified_at: Option<String>,
    pub last_checked_at: Option<String>,
    /// Set while DNS checks have been failing for a verified domain.
    pub failing_since: Option<String>,
    pub created_at: String,
}

/// Inbound-mail handling mode for a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InboundMode {
    Disabled,
    Forward,
    Webhook,
}

/// Domain as returned by `GET /v1/domains`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainListItem {
    #[serde(flatten)]
    pub domain: Domain,
    pub inbound_mode: InboundMode,
    pub inbound_ready: bool,
}

/// Which DNS concern a record covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsRecordKey {
    Dkim,
    Mx,
    Spf,
    Dmarc,
}

/// DNS record type to create at the registrar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    Cname,
    Txt,
    Mx,
}

/// One DNS record the domain owner must publish.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    pub key: DnsRecordKey,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub name: String,
    pub value: String,
    /// Only meaningful for MX records.
    pub priority: Option<u16>,
}

/// Domain plus the DNS records required to verify it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainWithDnsRecords {
    #[serde(flatten)]
    pub domain: Domain,
    pub dns_records: Vec<DnsRecord>,
}

/// Body for `POST /v1/domains`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateDomainRequest {
    pub name: String,
}

/// Lookup outcome for a single DNS record during verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RecordStatus {
    pub found: bool,
    pub valid: bool,
}

/// Per-record DNS check results from a verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct VerificationStatus {
    pub verified: bool,
    pub dkim: RecordStatus,
    pub mx: RecordStatus,
    pub spf: RecordStatus,
    pub dmarc: RecordStatus,
}

/// Response from `POST /v1/domains/{id}/verify`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DomainVerificationResult {
    pub domain: Domain,
    pub verification: VerificationStatus,
}

/// Whether a key sends real mail or runs in sandbox mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyMode {
    #[default]
    Live,
    Test,
}

/// What a key is allowed to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyPermission {
    #[default]
    FullAccess,
    Sending,
}

/// Domain an API key is restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiKeyDomainRef {
    pub id: String,
    pub name: String,
}

/// An API key as listed by the service. The secret is never included.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    /// First characters of the key, for display.
    pub key_prefix: String,
    pub mode: ApiKeyMode,
    pub permission: ApiKeyPermission,
    pub last_used_at: Option<String>,
    pub expires_at: Option<String>,
    pub created_at: String,
    pub domain: Option<ApiKeyDomainRef>,
}

/// Response from `POST /v1/api-keys`.
///
/// Carries the plaintext secret; the service returns it exactly once.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiKeyWithSecret {
    #[serde(flatten)]
    pub api_key: ApiKey,
    pub key: String,
}

/// Body for `POST /v1/api-keys`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    pub name: String,
    pub mode: ApiKeyMode,
    pub permission: ApiKeyPermission,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recipients_serialize_to_string_or_array() {
        let one = serde_json::to_value(Recipients::from("a@x.com")).unwrap();
        assert_eq!(one, json!("a@x.com"));

        let many =
            serde_json::to_value(Recipients::from(vec!["a@x.com".to_string(), "b@x.com".to_string()]))
                .unwrap();
        assert_eq!(many, json!(["a@x.com", "b@x.com"]));
    }

    #[test]
    fn send_request_omits_unset_fields_and_keeps_wire_names() {
        let request = SendEmailRequest {
            from: "a@x.com".to_string(),
            to: "b@x.com".into(),
            reply_to: Some("c@x.com".to_string()),
            scheduled_at: Some("2024-01-15T10:00:00Z".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "from": "a@x.com",
                "to": "b@x.com",
                "replyTo": "c@x.com",
                "scheduled_at": "2024-01-15T10:00:00Z",
            })
        );
    }

    #[test]
    fn batch_results_decode_both_variants() {
        let response: SendBatchEmailResponse = serde_json::from_value(json!({
            "data": [
                {"index": 0, "status": "sent", "id": "em_1"},
                {"index": 1, "status": "error", "error": {"code": "DOMAIN_NOT_VERIFIED", "message": "Domain not verified"}},
            ],
            "summary": {"total": 2, "sent": 1, "failed": 1},
        }))
        .unwrap();

        assert_eq!(response.summary.failed, 1);
        assert_eq!(
            response.data[0],
            BatchEmailResult::Sent {
                index: 0,
                id: "em_1".to_string(),
                suppressed: None,
            }
        );
        match &response.data[1] {
            BatchEmailResult::Error { index, error } => {
                assert_eq!(*index, 1);
                assert_eq!(error.code, "DOMAIN_NOT_VERIFIED");
            }
            other => panic!("expected error variant, got {other:?}"),
        }
    }

    #[test]
    fn template_update_distinguishes_clear_from_omit() {
        let request = UpdateTemplateRequest {
            subject: Some("Updated".to_string()),
            html: Some(None),
            ..Default::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"subject": "Updated", "html": null}));
    }

    #[test]
    fn domain_list_item_flattens_domain_fields() {
        let item: DomainListItem = serde_json::from_value(json!({
            "id": "dom_1",
            "name": "example.com",
            "status": "temporary_failure",
            "verifiedAt": "2024-01-15T10:30:00Z",
            "lastCheckedAt": null,
            "failingSince": "2024-02-01T00:00:00Z",
            "createdAt": "2024-01-01T00:00:00Z",
            "inboundMode": "forward",
            "inboundReady": true,
        }))
        .unwrap();

        assert_eq!(item.domain.status, DomainStatus::TemporaryFailure);
        assert_eq!(item.inbound_mode, InboundMode::Forward);
        assert!(item.inbound_ready);
    }

    #[test]
    fn api_key_with_secret_flattens_key_fields() {
        let created: ApiKeyWithSecret = serde_json::from_value(json!({
            "id": "key_1",
            "name": "ci",
            "keyPrefix": "sp_live_ab",
            "mode": "live",
            "permission": "full_access",
            "lastUsedAt": null,
            "expiresAt": null,
            "createdAt": "2024-01-01T00:00:00Z",
            "domain": {"id": "dom_1", "name": "example.com"},
            "key": "sp_live_abcdef",
        }))
        .unwrap();

        assert_eq!(created.key, "sp_live_abcdef");
        assert_eq!(created.api_key.permission, ApiKeyPermission::FullAccess);
        assert_eq!(
            created.api_key.domain,
            Some(ApiKeyDomainRef {
                id: "dom_1".to_string(),
                name: "example.com".to_string(),
            })
        );
    }

    #[test]
    fn dns_record_type_uses_registrar_casing() {
        let record: DnsRecord = serde_json::from_value(json!({
            "key": "dkim",
            "type": "CNAME",
            "name": "pigeon._domainkey.example.com",
            "value": "dkim.sendpigeon.dev",
        }))
        .unwrap();

        assert_eq!(record.key, DnsRecordKey::Dkim);
        assert_eq!(record.record_type, DnsRecordType::Cname);
        assert_eq!(record.priority, None);
    }
}
