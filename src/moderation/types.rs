// Core types for the content moderation state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four postable entity kinds. Each maps to its own REST path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Opportunity,
    Event,
    Job,
    Resource,
}

impl ContentType {
    /// Path segment used by the type-specific endpoints
    /// (`/api/{opportunities|events|jobs|resources}/...`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            ContentType::Opportunity => "opportunities",
            ContentType::Event => "events",
            ContentType::Job => "jobs",
            ContentType::Resource => "resources",
        }
    }

    /// Segment used by the payment endpoints (`/api/payments/{contentType}/...`).
    pub fn payment_segment(&self) -> &'static str {
        match self {
            ContentType::Opportunity => "opportunity",
            ContentType::Event => "event",
            ContentType::Job => "job",
            ContentType::Resource => "resource",
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "opportunity" | "opportunities" => Ok(ContentType::Opportunity),
            "event" | "events" => Ok(ContentType::Event),
            "job" | "jobs" => Ok(ContentType::Job),
            "resource" | "resources" => Ok(ContentType::Resource),
            other => Err(format!("unknown content type: {other}")),
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContentType::Opportunity => "opportunity",
            ContentType::Event => "event",
            ContentType::Job => "job",
            ContentType::Resource => "resource",
        };
        write!(f, "{name}")
    }
}

/// Backend `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Active,
    Inactive,
}

/// Content payment pipeline status. Only ever advances forward
/// (or diverts to `Failed`); regression happens solely through an
/// explicit admin reject-payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    NotRequired,
    Pending,
    AwaitingPayment,
    PaymentUploaded,
    Verified,
    Failed,
}

/// Payment bookkeeping embedded in a content item. Distinct from the
/// promotion payment shape; the two are separate aggregates on the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentState {
    pub payment_status: Option<PaymentStatus>,
    pub payment_amount: Option<u64>,
    pub payment_reference: Option<String>,
    /// Receipt URL uploaded by the provider.
    pub payment_receipt: Option<String>,
    pub payment_requested_by: Option<String>,
    pub payment_requested_at: Option<DateTime<Utc>>,
    pub payment_uploaded_at: Option<DateTime<Utc>>,
    pub payment_verified_at: Option<DateTime<Utc>>,
    pub payment_verified_by: Option<String>,
    pub payment_notes: Option<String>,
}

/// Nested financial block some content types carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Financial {
    pub is_paid: Option<bool>,
}

/// A user-submitted postable entity as returned by the moderation endpoints.
/// Unknown backend fields are ignored; the response schema is free-form JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub title: Option<String>,
    pub status: ContentStatus,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_paid: Option<bool>,
    #[serde(default)]
    pub financial: Option<Financial>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub payment: PaymentState,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub disable_reason: Option<String>,
    #[serde(default)]
    pub scheduled_review_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    /// Whether this item owes money before it can go live.
    ///
    /// Fallback chain, first truthy wins:
    /// `isPaid -> financial.isPaid -> paymentAmount -> price`.
    pub fn has_paid_section(&self) -> bool {
        if self.is_paid == Some(true) {
            return true;
        }
        if self
            .financial
            .as_ref()
            .and_then(|f| f.is_paid)
            .unwrap_or(false)
        {
            return true;
        }
        if self.payment.payment_amount.unwrap_or(0) > 0 {
            return true;
        }
        self.price.unwrap_or(0.0) > 0.0
    }

    /// Terminal success predicate: visible to end users, fully approved and
    /// paid for (when payment is required at all).
    pub fn is_live(&self) -> bool {
        self.status == ContentStatus::Active
            && self.is_approved
            && (self.payment.payment_status == Some(PaymentStatus::Verified)
                || !self.has_paid_section())
    }
}
