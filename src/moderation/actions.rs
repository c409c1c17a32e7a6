// Admin action validation - every rule here runs before any network call.
// A validation failure means the backend is never contacted.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::state::ModerationState;
use super::types::{ContentItem, ContentStatus};

/// Amount pre-filled when an admin requests payment and the item carries no
/// prior amount. Whole Naira, no minor units.
pub const DEFAULT_PAYMENT_AMOUNT: u64 = 5000;

/// Admin-triggered moderation actions.
#[derive(Debug, Clone, PartialEq)]
pub enum ModerationAction {
    /// Approve a submitted item. Free content auto-publishes downstream;
    /// paid content waits for an explicit payment request.
    Approve,
    /// Reject a submitted item with a mandatory reason.
    Reject { reason: String },
    /// Request payment from the provider. Also accepted from
    /// `PaymentFailed` so the admin has an explicit re-entry path after a
    /// rejected receipt.
    RequestPayment { amount: u64, notes: Option<String> },
    /// Verify or reject an uploaded receipt. Rejecting never downgrades
    /// `isApproved`.
    VerifyPayment { verified: bool, notes: Option<String> },
    /// Direct status override, bypassing the payment pipeline. Disabling
    /// requires a reason.
    ChangeState {
        new_status: ContentStatus,
        disable_reason: Option<String>,
    },
    /// Pull the item back to draft until an external scheduler re-surfaces
    /// it at the given instant.
    ScheduleReview { at: DateTime<Utc> },
    /// Generic field patch dispatched to the type-specific update endpoint.
    EditContent { patch: serde_json::Value },
}

#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    #[error("{action} is not valid while the item is {state}")]
    InvalidState {
        action: &'static str,
        state: ModerationState,
    },
    #[error("item is already approved (approved by {by})")]
    AlreadyApproved { by: String },
    #[error("a rejection reason is required")]
    MissingReason,
    #[error("payment amount must be greater than zero (got {amount})")]
    InvalidAmount { amount: u64 },
    #[error("a disable reason is required when moving an item to inactive")]
    MissingDisableReason,
    #[error("scheduled review must be in the future (got {at})")]
    ScheduleInPast { at: DateTime<Utc> },
    #[error("edit patch must be a non-empty JSON object")]
    EmptyPatch,
}

impl ModerationAction {
    /// Short name used in errors and tracing fields.
    pub fn name(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject { .. } => "reject",
            ModerationAction::RequestPayment { .. } => "request-payment",
            ModerationAction::VerifyPayment { .. } => "verify-payment",
            ModerationAction::ChangeState { .. } => "set-state",
            ModerationAction::ScheduleReview { .. } => "schedule-review",
            ModerationAction::EditContent { .. } => "edit",
        }
    }

    /// Validate this action against the item's current derived state.
    pub fn validate(&self, item: &ContentItem) -> Result<(), TransitionError> {
        self.validate_at(item, Utc::now())
    }

    /// Validation with an injectable clock, for deterministic tests.
    pub fn validate_at(&self, item: &ContentItem, now: DateTime<Utc>) -> Result<(), TransitionError> {
        let state = ModerationState::derive(item);

        match self {
            ModerationAction::Approve => {
                if item.is_approved {
                    return Err(TransitionError::AlreadyApproved {
                        by: item
                            .approved_by
                            .clone()
                            .unwrap_or_else(|| "unknown".to_string()),
                    });
                }
                match state {
                    ModerationState::PendingReview | ModerationState::InactiveNotApproved => Ok(()),
                    other => Err(TransitionError::InvalidState {
                        action: "approve",
                        state: other,
                    }),
                }
            }
            ModerationAction::Reject { reason } => {
                if reason.trim().is_empty() {
                    return Err(TransitionError::MissingReason);
                }
                if state != ModerationState::PendingReview {
                    return Err(TransitionError::InvalidState {
                        action: "reject",
                        state,
                    });
                }
                Ok(())
            }
            ModerationAction::RequestPayment { amount, .. } => {
                if *amount == 0 {
                    return Err(TransitionError::InvalidAmount { amount: *amount });
                }
                match state {
                    ModerationState::ApprovedAwaitingPayment | ModerationState::PaymentFailed => {
                        Ok(())
                    }
                    other => Err(TransitionError::InvalidState {
                        action: "request-payment",
                        state: other,
                    }),
                }
            }
            ModerationAction::VerifyPayment { .. } => {
                if state != ModerationState::PaymentUploaded {
                    return Err(TransitionError::InvalidState {
                        action: "verify-payment",
                        state,
                    });
                }
                Ok(())
            }
            ModerationAction::ChangeState {
                new_status,
                disable_reason,
            } => {
                if *new_status == ContentStatus::Inactive
                    && disable_reason
                        .as_deref()
                        .map(str::trim)
                        .unwrap_or("")
                        .is_empty()
                {
                    return Err(TransitionError::MissingDisableReason);
                }
                Ok(())
            }
            ModerationAction::ScheduleReview { at } => {
                if *at <= now {
                    return Err(TransitionError::ScheduleInPast { at: *at });
                }
                Ok(())
            }
            ModerationAction::EditContent { patch } => match patch.as_object() {
                Some(map) if !map.is_empty() => Ok(()),
                _ => Err(TransitionError::EmptyPatch),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::types::PaymentStatus;
    use chrono::Duration;

    fn pending_item() -> ContentItem {
        serde_json::from_value(serde_json::json!({
            "id": "c-1",
            "contentType": "opportunity",
            "status": "active",
            "isApproved": false,
        }))
        .unwrap()
    }

    #[test]
    fn approve_from_pending_review() {
        assert_eq!(ModerationAction::Approve.validate(&pending_item()), Ok(()));
    }

    #[test]
    fn approve_from_inactive_not_approved_is_a_re_review() {
        let mut item = pending_item();
        item.status = ContentStatus::Inactive;
        assert_eq!(ModerationAction::Approve.validate(&item), Ok(()));
    }

    #[test]
    fn double_approve_is_rejected() {
        let mut item = pending_item();
        item.is_approved = true;
        item.approved_by = Some("admin-1".to_string());
        assert_eq!(
            ModerationAction::Approve.validate(&item),
            Err(TransitionError::AlreadyApproved {
                by: "admin-1".to_string()
            })
        );
    }

    #[test]
    fn reject_requires_a_reason() {
        assert_eq!(
            ModerationAction::Reject {
                reason: "   ".to_string()
            }
            .validate(&pending_item()),
            Err(TransitionError::MissingReason)
        );
        assert_eq!(
            ModerationAction::Reject {
                reason: "spam".to_string()
            }
            .validate(&pending_item()),
            Ok(())
        );
    }

    #[test]
    fn request_payment_rejects_zero_amount() {
        let mut item = pending_item();
        item.is_approved = true;
        item.is_paid = Some(true);
        assert_eq!(
            ModerationAction::RequestPayment {
                amount: 0,
                notes: None
            }
            .validate(&item),
            Err(TransitionError::InvalidAmount { amount: 0 })
        );
        assert_eq!(
            ModerationAction::RequestPayment {
                amount: DEFAULT_PAYMENT_AMOUNT,
                notes: None
            }
            .validate(&item),
            Ok(())
        );
    }

    #[test]
    fn request_payment_allowed_again_after_failed_verification() {
        let mut item = pending_item();
        item.is_approved = true;
        item.is_paid = Some(true);
        item.payment.payment_status = Some(PaymentStatus::Failed);
        assert_eq!(
            ModerationAction::RequestPayment {
                amount: 5000,
                notes: None
            }
            .validate(&item),
            Ok(())
        );
    }

    #[test]
    fn verify_payment_requires_an_uploaded_receipt() {
        let mut item = pending_item();
        item.is_approved = true;
        item.is_paid = Some(true);
        let verify = ModerationAction::VerifyPayment {
            verified: true,
            notes: None,
        };
        assert!(matches!(
            verify.validate(&item),
            Err(TransitionError::InvalidState { .. })
        ));

        item.payment.payment_status = Some(PaymentStatus::PaymentUploaded);
        assert_eq!(verify.validate(&item), Ok(()));
    }

    #[test]
    fn disabling_requires_a_reason() {
        let item = pending_item();
        assert_eq!(
            ModerationAction::ChangeState {
                new_status: ContentStatus::Inactive,
                disable_reason: None,
            }
            .validate(&item),
            Err(TransitionError::MissingDisableReason)
        );
        assert_eq!(
            ModerationAction::ChangeState {
                new_status: ContentStatus::Inactive,
                disable_reason: Some("duplicate listing".to_string()),
            }
            .validate(&item),
            Ok(())
        );
        // Draft/active overrides need no reason.
        assert_eq!(
            ModerationAction::ChangeState {
                new_status: ContentStatus::Draft,
                disable_reason: None,
            }
            .validate(&item),
            Ok(())
        );
    }

    #[test]
    fn schedule_review_must_be_in_the_future() {
        let item = pending_item();
        let now = Utc::now();
        assert!(matches!(
            ModerationAction::ScheduleReview {
                at: now - Duration::hours(1)
            }
            .validate_at(&item, now),
            Err(TransitionError::ScheduleInPast { .. })
        ));
        assert_eq!(
            ModerationAction::ScheduleReview {
                at: now + Duration::hours(1)
            }
            .validate_at(&item, now),
            Ok(())
        );
    }

    #[test]
    fn edit_patch_must_be_a_non_empty_object() {
        let item = pending_item();
        assert_eq!(
            ModerationAction::EditContent {
                patch: serde_json::json!({})
            }
            .validate(&item),
            Err(TransitionError::EmptyPatch)
        );
        assert_eq!(
            ModerationAction::EditContent {
                patch: serde_json::json!(["not", "an", "object"])
            }
            .validate(&item),
            Err(TransitionError::EmptyPatch)
        );
        assert_eq!(
            ModerationAction::EditContent {
                patch: serde_json::json!({"title": "Updated"})
            }
            .validate(&item),
            Ok(())
        );
    }
}
