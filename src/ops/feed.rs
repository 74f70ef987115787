use serde::Serialize;

use crate::model::feed::{ActivityFeed, ActivityFeedItem};

/// One visible bucket of the activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedSection<'a> {
    pub title: &'static str,
    pub items: &'a [ActivityFeedItem],
}

/// Buckets in fixed order (Today, Yesterday, This Week), skipping empty
/// ones. Items keep their order within a bucket.
pub fn feed_sections(feed: &ActivityFeed) -> Vec<FeedSection<'_>> {
    [
        ("Today", feed.today.as_slice()),
        ("Yesterday", feed.yesterday.as_slice()),
        ("This Week", feed.this_week.as_slice()),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .map(|(title, items)| FeedSection { title, items })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::feed::FeedKind;

    fn item(id: u32) -> ActivityFeedItem {
        ActivityFeedItem {
            id,
            kind: FeedKind::Task,
            title: format!("item {}", id),
            description: String::new(),
            time: "now".into(),
            status: None,
        }
    }

    #[test]
    fn empty_buckets_are_skipped() {
        let feed = ActivityFeed {
            today: vec![],
            yesterday: vec![item(1)],
            this_week: vec![],
        };
        let sections = feed_sections(&feed);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Yesterday");
    }

    #[test]
    fn order_within_bucket_is_preserved() {
        let feed = ActivityFeed {
            today: vec![item(3), item(1), item(2)],
            yesterday: vec![],
            this_week: vec![item(9)],
        };
        let sections = feed_sections(&feed);
        let ids: Vec<u32> = sections[0].items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(sections[1].title, "This Week");
    }

    #[test]
    fn empty_feed_renders_nothing() {
        assert!(feed_sections(&ActivityFeed::default()).is_empty());
    }
}
