use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Task,
    Expense,
    Chat,
}

/// A read-only activity entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFeedItem {
    pub id: u32,
    pub kind: FeedKind,
    pub title: String,
    pub description: String,
    /// Pre-formatted relative time ("2 hours ago")
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Activity items already grouped into fixed time buckets
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFeed {
    pub today: Vec<ActivityFeedItem>,
    pub yesterday: Vec<ActivityFeedItem>,
    pub this_week: Vec<ActivityFeedItem>,
}
