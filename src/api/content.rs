// Content moderation endpoints.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::moderation::{ContentItem, ContentStatus, ContentType, ListFilter};

use super::client::ApiClient;
use super::errors::ApiError;
use super::types::Page;

impl ApiClient {
    /// `GET /api/admin/content/moderation` - paginated, filterable.
    pub async fn list_moderation(
        &self,
        filter: &ListFilter,
        page: u32,
        limit: u32,
    ) -> Result<Page<ContentItem>, ApiError> {
        let query = filter.to_query(page, limit);
        let data = self.get_json("/api/admin/content/moderation", &query).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// `GET /api/{segment}/{id}` - re-fetch a single item after a
    /// transition. The backend is the sole source of truth; the client
    /// never keeps optimistic state.
    pub async fn fetch_content(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<ContentItem, ApiError> {
        let path = format!("/api/{}/{}", content_type.path_segment(), id);
        let data = self.get_json(&path, &[]).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// `POST /api/{segment}/{id}/approve`
    pub async fn approve_content(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/api/{}/{}/approve", content_type.path_segment(), id);
        self.post_json(&path, json!({})).await?;
        Ok(())
    }

    /// `POST /api/{segment}/{id}/disapprove` with the rejection reason.
    pub async fn disapprove_content(
        &self,
        content_type: ContentType,
        id: &str,
        rejection_reason: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/api/{}/{}/disapprove", content_type.path_segment(), id);
        self.post_json(&path, json!({ "rejectionReason": rejection_reason }))
            .await?;
        Ok(())
    }

    /// `PUT /api/{segment}/{id}` - generic patch, used for field edits,
    /// direct status overrides, and review scheduling.
    pub async fn update_content(
        &self,
        content_type: ContentType,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<(), ApiError> {
        let path = format!("/api/{}/{}", content_type.path_segment(), id);
        self.put_json(&path, patch).await?;
        Ok(())
    }

    /// Status override patch body.
    pub async fn set_content_status(
        &self,
        content_type: ContentType,
        id: &str,
        status: ContentStatus,
        disable_reason: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut patch = json!({ "status": status });
        if let Some(reason) = disable_reason {
            patch["disableReason"] = json!(reason);
        }
        self.update_content(content_type, id, patch).await
    }

    /// Schedule patch body: forces draft until the scheduler re-surfaces
    /// the item.
    pub async fn schedule_content_review(
        &self,
        content_type: ContentType,
        id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let patch = json!({
            "status": ContentStatus::Draft,
            "scheduledReviewAt": at.to_rfc3339(),
        });
        self.update_content(content_type, id, patch).await
    }
}
