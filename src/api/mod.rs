// Backend REST API client
//
// Thin typed wrappers over the platform API: bearer-authenticated JSON
// calls with the `{success, data|message|errors}` envelope, a single
// transparent token refresh on 401, and per-status error mapping.

pub mod client;
pub mod content;
pub mod errors;
pub mod payments;
pub mod promotions;
pub mod types;

pub use client::ApiClient;
pub use errors::ApiError;
pub use promotions::PromotionAdminAction;
pub use types::{Envelope, Page};
