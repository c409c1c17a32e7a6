// Content payment endpoints.
//
// Receipt upload and verification are two independent round-trips; the
// backend treats receipt presence and confirmation as separately retryable,
// so a failure between them leaves a recoverable state.

use serde_json::json;

use crate::moderation::ContentType;

use super::client::ApiClient;
use super::errors::ApiError;

impl ApiClient {
    /// `POST /api/payments/{contentType}/{id}/request`
    pub async fn request_payment(
        &self,
        content_type: ContentType,
        id: &str,
        amount: u64,
        notes: Option<&str>,
    ) -> Result<(), ApiError> {
        let path = format!(
            "/api/payments/{}/{}/request",
            content_type.payment_segment(),
            id
        );
        self.post_json(&path, json!({ "amount": amount, "notes": notes }))
            .await?;
        Ok(())
    }

    /// `POST /api/payments/{contentType}/{id}/verify`
    pub async fn verify_payment(
        &self,
        content_type: ContentType,
        id: &str,
        verified: bool,
        notes: Option<&str>,
    ) -> Result<(), ApiError> {
        let path = format!(
            "/api/payments/{}/{}/verify",
            content_type.payment_segment(),
            id
        );
        self.post_json(&path, json!({ "verified": verified, "notes": notes }))
            .await?;
        Ok(())
    }

    /// `POST /api/payments/{contentType}/{id}/receipt` - provider-side
    /// receipt upload (multipart).
    pub async fn upload_receipt(
        &self,
        content_type: ContentType,
        id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let path = format!(
            "/api/payments/{}/{}/receipt",
            content_type.payment_segment(),
            id
        );
        self.post_multipart(&path, "receipt", file_name, bytes)
            .await?;
        Ok(())
    }
}
