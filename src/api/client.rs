use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::http::RateLimitedHttpClient;
use crate::observability::api_metrics;
use crate::session::Session;

use super::errors::ApiError;

/// Authenticated JSON client for the platform backend.
///
/// Every call is a single request/response round-trip. A 401 answer
/// triggers exactly one token refresh and one retry; no other failure is
/// retried automatically - the admin re-invokes the action.
#[derive(Debug, Clone)]
pub struct ApiClient {
    limited: RateLimitedHttpClient,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<Session>,
        requests_per_minute: u32,
        burst: u32,
    ) -> Result<Self, ApiError> {
        let limited = RateLimitedHttpClient::new(requests_per_minute, burst)?;
        Ok(Self {
            limited,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET with bearer auth and response caching.
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Value, ApiError> {
        let cache_key = format!(
            "GET {}?{}",
            path,
            query
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&")
        );
        if let Some(cached) = self.limited.cached(&cache_key).await {
            return Ok(cached);
        }

        let data = self.request(Method::GET, path, query, None).await?;
        self.limited.store(cache_key, data.clone()).await;
        Ok(data)
    }

    /// POST with bearer auth; invalidates cached reads touching `path`.
    pub async fn post_json(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let data = self.request(Method::POST, path, &[], Some(body)).await?;
        self.invalidate_after_write().await;
        Ok(data)
    }

    /// PUT with bearer auth; invalidates cached reads touching `path`.
    pub async fn put_json(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let data = self.request(Method::PUT, path, &[], Some(body)).await?;
        self.invalidate_after_write().await;
        Ok(data)
    }

    /// Multipart POST (receipt and hero-image uploads).
    pub async fn post_multipart(
        &self,
        path: &str,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ApiError> {
        self.limited.acquire().await;
        let bearer = self
            .session
            .bearer()
            .await
            .ok_or(ApiError::NotAuthenticated)?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);
        let response = self
            .limited
            .http()
            .post(self.url(path))
            .bearer_auth(bearer)
            .multipart(form)
            .send()
            .await?;

        let data = self.decode(response).await?;
        self.invalidate_after_write().await;
        Ok(data)
    }

    /// Unauthenticated GET used by the doctor smoke checks. Returns the
    /// HTTP status code without touching the session.
    pub async fn smoke_get(&self, path: &str) -> Result<StatusCode, ApiError> {
        self.limited.acquire().await;
        let response = self.limited.http().get(self.url(path)).send().await?;
        Ok(response.status())
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        self.limited.acquire().await;
        let bearer = self
            .session
            .bearer()
            .await
            .ok_or(ApiError::NotAuthenticated)?;

        debug!(method = %method, path = %path, "Issuing backend request");
        let response = self
            .send_once(method.clone(), path, query, body.as_ref(), &bearer)
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return self.decode(response).await;
        }

        // One transparent refresh, then one retry. A failed refresh tears
        // the session down inside Session::refresh.
        warn!(path = %path, "Got 401, attempting token refresh");
        self.session
            .refresh()
            .await
            .map_err(|_| ApiError::SessionExpired)?;
        let bearer = self
            .session
            .bearer()
            .await
            .ok_or(ApiError::SessionExpired)?;
        let response = self
            .send_once(method, path, query, body.as_ref(), &bearer)
            .await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            self.session.tear_down().await;
            return Err(ApiError::SessionExpired);
        }
        self.decode(response).await
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
        bearer: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let mut builder = self
            .limited
            .http()
            .request(method, self.url(path))
            .bearer_auth(bearer);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    /// Map status codes onto the error taxonomy and unwrap the
    /// `{success, data|message|errors}` envelope.
    async fn decode(&self, response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();

        if status == StatusCode::TOO_MANY_REQUESTS {
            api_metrics().record_rate_limit_hit();
            return Err(ApiError::RateLimited);
        }
        if status == StatusCode::FORBIDDEN {
            api_metrics().record_error();
            return Err(ApiError::Forbidden { message });
        }
        if status.is_client_error() {
            api_metrics().record_error();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        if status.is_server_error() {
            api_metrics().record_error();
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: super::types::Envelope<Value> = serde_json::from_value(body)?;
        if !envelope.success {
            api_metrics().record_error();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            });
        }
        // Some action endpoints answer success with a message and no data.
        Ok(envelope.data.unwrap_or(Value::Null))
    }

    async fn invalidate_after_write(&self) {
        // Any write can change list membership and tab counts, so all
        // cached moderation reads go.
        self.limited.invalidate_pattern("/api/").await;
    }
}
