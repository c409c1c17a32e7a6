// Promotion Lifecycle Module
//
// A promotion is a separate aggregate referencing a content item; its
// payment flow mirrors the content one but is a distinct instance. One item
// can owe money for publication and again for promotion at the same time.

pub mod packages;
pub mod state_machine;
pub mod types;

pub use packages::{custom_contact_mailto, validate_creation, CreationError};
pub use state_machine::{PromotionEvent, PromotionMachine};
pub use types::{PackageType, Promotion, PromotionPaymentStatus, PromotionStatus};
