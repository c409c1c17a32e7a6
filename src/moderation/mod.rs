// Content Moderation Module - Explicit State Machine
//
// The backend stores moderation state as independent fields (status,
// isApproved, paymentStatus). This module derives a single enum from that
// triple and validates every admin action against it before any network call.

pub mod actions;
pub mod categorize;
pub mod schedule;
pub mod state;
pub mod types;

pub use actions::{ModerationAction, TransitionError, DEFAULT_PAYMENT_AMOUNT};
pub use categorize::{ListFilter, Tab, TabCounts};
pub use schedule::{combine_date_time, ScheduleError};
pub use state::ModerationState;
pub use types::{
    ContentItem, ContentStatus, ContentType, Financial, PaymentState, PaymentStatus,
};
