// Moderation coordinator - validates, guards, calls the backend, re-fetches.
//
// Order of operations for every admin action:
//   1. client-side validation (a failure here issues no network call)
//   2. claim the in-flight slot for the entity id
//   3. one request/response round-trip
//   4. re-fetch the item; the backend is the sole source of truth

use thiserror::Error;
use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::inflight::InFlightRegistry;
use crate::moderation::{ContentItem, ModerationAction, ModerationState, TransitionError};
use crate::telemetry::{create_moderation_span, generate_correlation_id};

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("another action on {id} is still in flight")]
    ActionInFlight { id: String },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result of a completed action: the state before, the state the backend
/// reports after, and the re-fetched item.
#[derive(Debug)]
pub struct ActionOutcome {
    pub previous_state: ModerationState,
    pub new_state: ModerationState,
    pub item: ContentItem,
}

#[derive(Debug, Clone)]
pub struct ModerationCoordinator {
    api: ApiClient,
    inflight: InFlightRegistry,
}

impl ModerationCoordinator {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            inflight: InFlightRegistry::new(),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Execute one admin action against the current snapshot of an item.
    pub async fn execute(
        &self,
        item: &ContentItem,
        action: ModerationAction,
    ) -> Result<ActionOutcome, CoordinatorError> {
        action.validate(item)?;

        let _guard = self
            .inflight
            .try_begin(&item.id)
            .ok_or_else(|| CoordinatorError::ActionInFlight {
                id: item.id.clone(),
            })?;

        let correlation_id = generate_correlation_id();
        let span = create_moderation_span(
            action.name(),
            Some(&item.id),
            Some(item.content_type.path_segment()),
            Some(&correlation_id),
        );
        let _entered = span.enter();

        let previous_state = ModerationState::derive(item);
        self.dispatch(item, &action).await?;

        // No optimistic mutation: always read back what the backend stored.
        let refreshed = self.api.fetch_content(item.content_type, &item.id).await?;
        let new_state = ModerationState::derive(&refreshed);
        crate::observability::api_metrics().record_moderation_action();
        info!(
            content_id = %item.id,
            action = action.name(),
            previous_state = %previous_state,
            new_state = %new_state,
            "Moderation action completed"
        );

        Ok(ActionOutcome {
            previous_state,
            new_state,
            item: refreshed,
        })
    }

    async fn dispatch(
        &self,
        item: &ContentItem,
        action: &ModerationAction,
    ) -> Result<(), ApiError> {
        let ct = item.content_type;
        match action {
            ModerationAction::Approve => self.api.approve_content(ct, &item.id).await,
            ModerationAction::Reject { reason } => {
                self.api.disapprove_content(ct, &item.id, reason).await
            }
            ModerationAction::RequestPayment { amount, notes } => {
                self.api
                    .request_payment(ct, &item.id, *amount, notes.as_deref())
                    .await
            }
            ModerationAction::VerifyPayment { verified, notes } => {
                self.api
                    .verify_payment(ct, &item.id, *verified, notes.as_deref())
                    .await
            }
            ModerationAction::ChangeState {
                new_status,
                disable_reason,
            } => {
                self.api
                    .set_content_status(ct, &item.id, *new_status, disable_reason.as_deref())
                    .await
            }
            ModerationAction::ScheduleReview { at } => {
                self.api.schedule_content_review(ct, &item.id, *at).await
            }
            ModerationAction::EditContent { patch } => {
                self.api.update_content(ct, &item.id, patch.clone()).await
            }
        }
    }
}
