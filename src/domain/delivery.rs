use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Header carrying the event category (`ping`, `push`, ...)
pub const EVENT_HEADER: &str = "X-GitHub-Event";
/// Header carrying `sha256=<hex>` over the raw body
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";
/// Header carrying the sender's unique delivery GUID
pub const DELIVERY_HEADER: &str = "X-GitHub-Delivery";

/// Event name used for routing when the sender omitted the event header
pub const UNKNOWN_EVENT: &str = "unknown";

/// The inbound headers relevant to authentication and routing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryHeaders {
    #[serde(rename = "X-GitHub-Event")]
    pub event: Option<String>,

    #[serde(rename = "X-Hub-Signature-256")]
    pub signature: Option<String>,

    #[serde(rename = "X-GitHub-Delivery")]
    pub delivery: Option<String>,
}

/// One authenticated webhook delivery.
///
/// Records are only ever built after the signature check passed, and are
/// immutable once created. They are shared behind an `Arc` between the
/// recent-deliveries buffer, the persistence sink and the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryRecord {
    #[serde(with = "time::serde::rfc3339")]
    pub received_at: OffsetDateTime,

    pub delivery_id: Option<String>,

    pub event: Option<String>,

    pub headers: DeliveryHeaders,

    pub body: Value,
}

impl DeliveryRecord {
    /// Create a record stamped with the current UTC time
    pub fn new(headers: DeliveryHeaders, body: Value) -> Self {
        Self::with_received_at(OffsetDateTime::now_utc(), headers, body)
    }

    /// Create a record with an explicit reception time
    pub fn with_received_at(
        received_at: OffsetDateTime,
        headers: DeliveryHeaders,
        body: Value,
    ) -> Self {
        Self {
            received_at,
            delivery_id: headers.delivery.clone(),
            event: headers.event.clone(),
            headers,
            body,
        }
    }

    /// Event name used for routing; `"unknown"` when the header was absent
    pub fn event_name(&self) -> &str {
        self.event.as_deref().unwrap_or(UNKNOWN_EVENT)
    }
}
