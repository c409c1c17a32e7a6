// Session lifecycle - explicit service instead of ambient token globals.
//
// Holds the bearer/refresh token pair, refreshes transparently (once) when
// the backend answers 401, refreshes periodically in the background, and
// tears the session down when a refresh fails.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no active session")]
    NoSession,
    #[error("token refresh rejected by the backend ({status})")]
    RefreshRejected { status: u16 },
    #[error("network error during refresh: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected refresh response: {0}")]
    Decode(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshPayload {
    token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct RefreshEnvelope {
    #[serde(default)]
    success: bool,
    data: Option<RefreshPayload>,
}

/// Explicit session service. Lifecycle is tied to sign-in/sign-out, not to
/// process-wide globals.
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    refresh_url: String,
    tokens: RwLock<Option<TokenPair>>,
}

impl Session {
    pub fn new(base_url: &str, tokens: Option<TokenPair>) -> Self {
        Self {
            http: reqwest::Client::new(),
            refresh_url: format!("{}/api/auth/refresh", base_url.trim_end_matches('/')),
            tokens: RwLock::new(tokens),
        }
    }

    /// Current bearer token, if signed in.
    pub async fn bearer(&self) -> Option<String> {
        self.tokens.read().await.as_ref().map(|t| t.access.clone())
    }

    pub async fn is_active(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// Exchange the refresh token for a new pair. On any failure the
    /// session is torn down; callers must treat that as a forced sign-out.
    pub async fn refresh(&self) -> Result<(), SessionError> {
        let refresh_token = {
            let guard = self.tokens.read().await;
            guard
                .as_ref()
                .map(|t| t.refresh.clone())
                .ok_or(SessionError::NoSession)?
        };

        let result = self.do_refresh(&refresh_token).await;
        match result {
            Ok(pair) => {
                *self.tokens.write().await = Some(pair);
                crate::observability::api_metrics().record_auth_refresh();
                info!("Session token refreshed");
                Ok(())
            }
            Err(err) => {
                self.tear_down().await;
                Err(err)
            }
        }
    }

    async fn do_refresh(&self, refresh_token: &str) -> Result<TokenPair, SessionError> {
        let response = self
            .http
            .post(&self.refresh_url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::RefreshRejected {
                status: status.as_u16(),
            });
        }

        let envelope: RefreshEnvelope = response
            .json()
            .await
            .map_err(|e| SessionError::Decode(e.to_string()))?;
        let payload = match envelope {
            RefreshEnvelope {
                success: true,
                data: Some(payload),
            } => payload,
            _ => return Err(SessionError::Decode("refresh envelope had no data".to_string())),
        };

        Ok(TokenPair {
            access: payload.token,
            refresh: payload.refresh_token,
        })
    }

    /// Drop the token pair. Subsequent authenticated calls fail with
    /// `NotAuthenticated` until a new sign-in.
    pub async fn tear_down(&self) {
        let mut guard = self.tokens.write().await;
        if guard.take().is_some() {
            warn!("Session torn down; admin must sign in again");
        }
    }

    /// Spawn the periodic background refresh. The task exits once the
    /// session is gone.
    pub fn spawn_periodic_refresh(
        self: &Arc<Self>,
        interval: Duration,
    ) -> tokio::task::JoinHandle<()> {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // First tick fires immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !session.is_active().await {
                    info!("Session gone, stopping periodic refresh");
                    break;
                }
                if let Err(err) = session.refresh().await {
                    warn!(error = %err, "Periodic token refresh failed");
                    break;
                }
            }
        })
    }
}
