// Wire envelope and pagination types shared by the endpoint wrappers.

use serde::Deserialize;
use serde_json::Value;

/// Standard response envelope: `{success, data|message|errors}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Value>,
}

/// Paginated list payload. The backend sends either `data` or `items` for
/// the entries; counts are best-effort since the schema is free-form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(alias = "items", default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}
