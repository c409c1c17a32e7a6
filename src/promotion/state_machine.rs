use serde::{Deserialize, Serialize};
use statig::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PromotionEvent {
    Approve,
    Reject { reason: String },
    UploadProof { reference: String },
    VerifyPayment,
    RejectPayment { reason: String },
    Pause,
    Resume,
    Complete,
    Expire,
}

/// Promotion lifecycle:
/// pending -> {awaiting_payment (approved), rejected};
/// awaiting_payment -> awaiting_verification -> paid;
/// paid -> {paused, completed, expired}.
///
/// Rejecting a payment proof sends the promotion back to awaiting_payment;
/// this is the one sanctioned regression in the pipeline.
#[derive(Default)]
pub struct PromotionMachine {
    pub promotion_id: String,
    pub payment_reference: Option<String>,
    pub rejection_reason: Option<String>,
}

impl PromotionMachine {
    pub fn new(promotion_id: String) -> Self {
        Self {
            promotion_id,
            ..Default::default()
        }
    }
}

#[state_machine(initial = "State::pending()", state(derive(Debug, Clone, PartialEq, Eq)))]
impl PromotionMachine {
    #[state]
    fn pending(&mut self, event: &PromotionEvent) -> Outcome<State> {
        match event {
            PromotionEvent::Approve => {
                tracing::info!(promotion_id = %self.promotion_id, "Promotion approved");
                Transition(State::awaiting_payment())
            }
            PromotionEvent::Reject { reason } => {
                self.rejection_reason = Some(reason.clone());
                tracing::info!(
                    promotion_id = %self.promotion_id,
                    reason = %reason,
                    "Promotion rejected"
                );
                Transition(State::rejected())
            }
            _ => Handled,
        }
    }

    #[state]
    fn rejected(&mut self, event: &PromotionEvent) -> Outcome<State> {
        let _ = event;
        Handled
    }

    #[state]
    fn awaiting_payment(&mut self, event: &PromotionEvent) -> Outcome<State> {
        match event {
            PromotionEvent::UploadProof { reference } => {
                self.payment_reference = Some(reference.clone());
                tracing::info!(
                    promotion_id = %self.promotion_id,
                    reference = %reference,
                    "Payment proof uploaded"
                );
                Transition(State::awaiting_verification())
            }
            _ => Handled,
        }
    }

    #[state]
    fn awaiting_verification(&mut self, event: &PromotionEvent) -> Outcome<State> {
        match event {
            PromotionEvent::VerifyPayment => {
                tracing::info!(promotion_id = %self.promotion_id, "Promotion payment verified");
                Transition(State::paid())
            }
            PromotionEvent::RejectPayment { reason } => {
                self.payment_reference = None;
                tracing::warn!(
                    promotion_id = %self.promotion_id,
                    reason = %reason,
                    "Promotion payment rejected, provider must retry"
                );
                Transition(State::awaiting_payment())
            }
            _ => Handled,
        }
    }

    #[state]
    fn paid(&mut self, event: &PromotionEvent) -> Outcome<State> {
        match event {
            PromotionEvent::Pause => {
                tracing::info!(promotion_id = %self.promotion_id, "Promotion paused");
                Transition(State::paused())
            }
            PromotionEvent::Complete => {
                tracing::info!(promotion_id = %self.promotion_id, "Promotion completed");
                Transition(State::completed())
            }
            PromotionEvent::Expire => {
                tracing::info!(promotion_id = %self.promotion_id, "Promotion expired");
                Transition(State::expired())
            }
            _ => Handled,
        }
    }

    #[state]
    fn paused(&mut self, event: &PromotionEvent) -> Outcome<State> {
        match event {
            PromotionEvent::Resume => {
                tracing::info!(promotion_id = %self.promotion_id, "Promotion resumed");
                Transition(State::paid())
            }
            _ => Handled,
        }
    }

    #[state]
    fn completed(&mut self, event: &PromotionEvent) -> Outcome<State> {
        let _ = event;
        Handled
    }

    #[state]
    fn expired(&mut self, event: &PromotionEvent) -> Outcome<State> {
        let _ = event;
        Handled
    }
}
