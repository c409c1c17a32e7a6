// Promotion admin endpoints.

use serde_json::json;

use crate::promotion::Promotion;

use super::client::ApiClient;
use super::errors::ApiError;
use super::types::Page;

/// Admin actions exposed as `POST /api/admin/promotions/{id}/{action}`.
#[derive(Debug, Clone, PartialEq)]
pub enum PromotionAdminAction {
    Approve,
    Reject { reason: String },
    VerifyPayment,
    RejectPayment { reason: String },
    Pause,
}

impl PromotionAdminAction {
    pub fn path_segment(&self) -> &'static str {
        match self {
            PromotionAdminAction::Approve => "approve",
            PromotionAdminAction::Reject { .. } => "reject",
            PromotionAdminAction::VerifyPayment => "verify-payment",
            PromotionAdminAction::RejectPayment { .. } => "reject-payment",
            PromotionAdminAction::Pause => "pause",
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            PromotionAdminAction::Reject { reason }
            | PromotionAdminAction::RejectPayment { reason } => json!({ "reason": reason }),
            _ => json!({}),
        }
    }
}

impl ApiClient {
    /// `GET /api/admin/promotions`
    pub async fn list_promotions(&self, page: u32, limit: u32) -> Result<Page<Promotion>, ApiError> {
        let query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        let data = self.get_json("/api/admin/promotions", &query).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// `POST /api/admin/promotions/{id}/{action}`
    pub async fn promotion_action(
        &self,
        id: &str,
        action: &PromotionAdminAction,
    ) -> Result<(), ApiError> {
        let path = format!("/api/admin/promotions/{}/{}", id, action.path_segment());
        self.post_json(&path, action.body()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_path_segments_match_the_backend_routes() {
        assert_eq!(PromotionAdminAction::Approve.path_segment(), "approve");
        assert_eq!(
            PromotionAdminAction::VerifyPayment.path_segment(),
            "verify-payment"
        );
        assert_eq!(
            PromotionAdminAction::RejectPayment {
                reason: "x".to_string()
            }
            .path_segment(),
            "reject-payment"
        );
    }
}
