// Promotion wire types. Structurally similar to the content payment shape
// but kept as a distinct type; the backend treats them as separate
// aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::moderation::ContentType;

/// Paid visibility packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Spotlight,
    Feature,
    Launch,
    Custom,
}

impl PackageType {
    /// The launch package is blocked client-side until a hero image is
    /// attached.
    pub fn requires_hero_image(&self) -> bool {
        matches!(self, PackageType::Launch)
    }

    /// Custom/enterprise packages bypass automated pricing; the client
    /// produces an outbound contact action instead of a server transition.
    pub fn is_negotiated(&self) -> bool {
        matches!(self, PackageType::Custom)
    }
}

impl std::str::FromStr for PackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spotlight" => Ok(PackageType::Spotlight),
            "feature" => Ok(PackageType::Feature),
            "launch" => Ok(PackageType::Launch),
            "custom" => Ok(PackageType::Custom),
            other => Err(format!("unknown package type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
    Rejected,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionPaymentStatus {
    Pending,
    AwaitingPayment,
    AwaitingVerification,
    Paid,
    Failed,
}

/// A paid campaign boosting an existing content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    #[serde(alias = "_id")]
    pub id: String,
    pub content_id: String,
    pub content_type: ContentType,
    pub package_type: PackageType,
    pub status: PromotionStatus,
    pub payment_status: PromotionPaymentStatus,
    /// Amount in whole Naira.
    #[serde(default)]
    pub investment: Option<u64>,
    /// Campaign length in days.
    #[serde(default)]
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub hero_image_url: Option<String>,
}

impl Promotion {
    /// Days left in the campaign, derived from start time and duration.
    pub fn remaining_days(&self, now: DateTime<Utc>) -> Option<u32> {
        let started = self.started_at?;
        let duration = i64::from(self.duration_days?);
        let elapsed = (now - started).num_days().max(0);
        Some((duration - elapsed).max(0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn promo() -> Promotion {
        serde_json::from_value(serde_json::json!({
            "_id": "p-1",
            "contentId": "c-1",
            "contentType": "event",
            "packageType": "launch",
            "status": "active",
            "paymentStatus": "paid",
            "investment": 25000,
            "durationDays": 14,
            "startedAt": "2026-03-01T00:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn remaining_days_is_derived_and_clamped() {
        let p = promo();
        let mid = Utc.with_ymd_and_hms(2026, 3, 6, 0, 0, 0).unwrap();
        assert_eq!(p.remaining_days(mid), Some(9));

        let after = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(p.remaining_days(after), Some(0));
    }

    #[test]
    fn launch_requires_hero_image_and_custom_is_negotiated() {
        assert!(PackageType::Launch.requires_hero_image());
        assert!(!PackageType::Spotlight.requires_hero_image());
        assert!(PackageType::Custom.is_negotiated());
    }
}
