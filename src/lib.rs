// moddesk - admin moderation desk for the content platform
// Exposes the moderation core, API client, and session plumbing for
// integration tests and the CLI binary.

pub mod api;
pub mod config;
pub mod coordinator;
pub mod http;
pub mod inflight;
pub mod moderation;
pub mod observability;
pub mod promotion;
pub mod session;
pub mod telemetry;

// Re-export key types for easy access
pub use api::{ApiClient, ApiError, Page, PromotionAdminAction};
pub use config::{config, init_config, ModdeskConfig};
pub use coordinator::{ActionOutcome, CoordinatorError, ModerationCoordinator};
pub use http::RateLimitedHttpClient;
pub use inflight::{InFlightGuard, InFlightRegistry};
pub use moderation::{
    ContentItem, ContentStatus, ContentType, ListFilter, ModerationAction, ModerationState,
    PaymentState, PaymentStatus, Tab, TabCounts, TransitionError, DEFAULT_PAYMENT_AMOUNT,
};
pub use observability::{api_metrics, ApiMetrics, OperationTimer};
pub use promotion::{PackageType, Promotion, PromotionEvent, PromotionMachine, PromotionStatus};
pub use session::{Session, SessionError, TokenPair};
pub use telemetry::{generate_correlation_id, init_telemetry, shutdown_telemetry};
