// Derived moderation state - the single source for badge/state logic.
//
// The original dashboards recomputed this derivation inline in several
// places; here it lives in exactly one function.

use serde::{Deserialize, Serialize};

use super::types::{ContentItem, ContentStatus, PaymentStatus};

/// Composite moderation state derived from `status` x `isApproved` x
/// `paymentStatus`.
///
/// Payment signals take priority over basic status/approval combinations.
/// That ordering is display policy: an item can be simultaneously
/// active+approved and awaiting payment, and the payment state is what the
/// admin needs to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationState {
    /// Provider draft, never approved.
    TrueDraft,
    /// Approved content pulled back to draft (e.g. pending a scheduled
    /// review), hidden from the public.
    Hidden,
    /// Submitted and waiting for admin review.
    PendingReview,
    /// Approved paid content for which no payment has been requested yet.
    ApprovedAwaitingPayment,
    /// Payment requested, provider has not uploaded a receipt.
    AwaitingPayment,
    /// Receipt uploaded, waiting for admin verification.
    PaymentUploaded,
    /// Verified (or free) approved active content.
    Live,
    /// Admin rejected the uploaded receipt; provider must retry.
    PaymentFailed,
    /// Disabled or rejected, not approved.
    InactiveNotApproved,
    /// Disabled after having been approved.
    InactiveApproved,
}

impl ModerationState {
    /// Derive the composite state for an item. Pure; drives all badge and
    /// tab logic.
    pub fn derive(item: &ContentItem) -> Self {
        // Payment pipeline states win for display, whatever the basic
        // status/approval combination says.
        match item.payment.payment_status {
            Some(PaymentStatus::AwaitingPayment) => return ModerationState::AwaitingPayment,
            Some(PaymentStatus::PaymentUploaded) => return ModerationState::PaymentUploaded,
            Some(PaymentStatus::Failed) => return ModerationState::PaymentFailed,
            _ => {}
        }

        match (item.status, item.is_approved) {
            (ContentStatus::Draft, false) => ModerationState::TrueDraft,
            (ContentStatus::Draft, true) => ModerationState::Hidden,
            (ContentStatus::Inactive, false) => ModerationState::InactiveNotApproved,
            (ContentStatus::Inactive, true) => ModerationState::InactiveApproved,
            (ContentStatus::Active, false) => ModerationState::PendingReview,
            (ContentStatus::Active, true) => {
                if item.is_live() {
                    ModerationState::Live
                } else {
                    // Paid section present but payment never requested
                    // (or still marked not_required/pending).
                    ModerationState::ApprovedAwaitingPayment
                }
            }
        }
    }

    /// Badge label shown to the admin.
    pub fn label(&self) -> &'static str {
        match self {
            ModerationState::TrueDraft => "draft",
            ModerationState::Hidden => "hidden",
            ModerationState::PendingReview => "pending review",
            ModerationState::ApprovedAwaitingPayment => "approved - payment not requested",
            ModerationState::AwaitingPayment => "awaiting payment",
            ModerationState::PaymentUploaded => "payment uploaded",
            ModerationState::Live => "live",
            ModerationState::PaymentFailed => "payment failed",
            ModerationState::InactiveNotApproved => "inactive (not approved)",
            ModerationState::InactiveApproved => "inactive (approved)",
        }
    }
}

impl std::fmt::Display for ModerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
