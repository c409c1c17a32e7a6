// Client-side bucketing and filtering of fetched moderation lists.
//
// An item may belong to several tabs at once: approved content awaiting
// payment counts toward both the approved and awaiting-payment tabs. The
// dual membership is deliberate and the dashboards depend on it.

use super::state::ModerationState;
use super::types::{ContentItem, ContentStatus, ContentType, PaymentStatus};

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Pending,
    Approved,
    AwaitingPayment,
    PaymentUploaded,
    Live,
    Rejected,
}

impl Tab {
    /// All tabs this item belongs to.
    pub fn memberships(item: &ContentItem) -> Vec<Tab> {
        let mut tabs = Vec::new();
        if item.status == ContentStatus::Active && !item.is_approved {
            tabs.push(Tab::Pending);
        }
        if item.is_approved {
            tabs.push(Tab::Approved);
        }
        if item.payment.payment_status == Some(PaymentStatus::AwaitingPayment) {
            tabs.push(Tab::AwaitingPayment);
        }
        if item.payment.payment_status == Some(PaymentStatus::PaymentUploaded) {
            tabs.push(Tab::PaymentUploaded);
        }
        if item.is_live() {
            tabs.push(Tab::Live);
        }
        if ModerationState::derive(item) == ModerationState::InactiveNotApproved {
            tabs.push(Tab::Rejected);
        }
        tabs
    }
}

/// Per-tab counts for a fetched list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabCounts {
    pub pending: usize,
    pub approved: usize,
    pub awaiting_payment: usize,
    pub payment_uploaded: usize,
    pub live: usize,
    pub rejected: usize,
}

impl TabCounts {
    pub fn from_items<'a, I: IntoIterator<Item = &'a ContentItem>>(items: I) -> Self {
        let mut counts = TabCounts::default();
        for item in items {
            for tab in Tab::memberships(item) {
                match tab {
                    Tab::Pending => counts.pending += 1,
                    Tab::Approved => counts.approved += 1,
                    Tab::AwaitingPayment => counts.awaiting_payment += 1,
                    Tab::PaymentUploaded => counts.payment_uploaded += 1,
                    Tab::Live => counts.live += 1,
                    Tab::Rejected => counts.rejected += 1,
                }
            }
        }
        counts
    }
}

/// Filter applied to an already-fetched list (and forwarded as query
/// parameters when listing server-side).
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub content_type: Option<ContentType>,
    pub status: Option<ContentStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub search: Option<String>,
}

impl ListFilter {
    pub fn matches(&self, item: &ContentItem) -> bool {
        if let Some(ct) = self.content_type {
            if item.content_type != ct {
                return false;
            }
        }
        if let Some(status) = self.status {
            if item.status != status {
                return false;
            }
        }
        if let Some(ps) = self.payment_status {
            if item.payment.payment_status != Some(ps) {
                return false;
            }
        }
        if let Some(ref needle) = self.search {
            let needle = needle.to_lowercase();
            let haystack = item.title.as_deref().unwrap_or("").to_lowercase();
            if !haystack.contains(&needle) && !item.id.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Query-string pairs for the moderation list endpoint.
    pub fn to_query(&self, page: u32, limit: u32) -> Vec<(String, String)> {
        let mut q = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        if let Some(ct) = self.content_type {
            q.push(("type".to_string(), ct.to_string()));
        }
        if let Some(status) = self.status {
            // Wire names are lowercase, same as the serde representation.
            let s = match status {
                ContentStatus::Draft => "draft",
                ContentStatus::Active => "active",
                ContentStatus::Inactive => "inactive",
            };
            q.push(("status".to_string(), s.to_string()));
        }
        if let Some(ps) = self.payment_status {
            let s = serde_json::to_value(ps)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            q.push(("paymentStatus".to_string(), s));
        }
        if let Some(ref search) = self.search {
            q.push(("search".to_string(), search.clone()));
        }
        q
    }
}
