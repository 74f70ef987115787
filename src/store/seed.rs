//! Sample household data used on first run.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use indexmap::IndexMap;

use crate::model::chat::{ChatSetting, Conversation, ConversationKind, Message};
use crate::model::expense::{Expense, ExpenseStatus};
use crate::model::feed::{ActivityFeed, ActivityFeedItem, FeedKind};
use crate::model::roommate::{Roommate, Roster};
use crate::model::task::{Recurrence, Task, TaskStatus, Urgency};

pub fn default_roster() -> Roster {
    Roster::new(vec![
        Roommate::new(1, "Janvi Chauhan", "JC", "#356496"),
        Roommate::new(2, "Aranya Chaudhary", "AC", "#d86060"),
        Roommate::new(3, "Tamilla Zeynalova", "TZ", "#169530"),
        Roommate::new(4, "Aaish Ahmed", "AA", "#e49449"),
        Roommate::new(5, "Rami Abu Sultan", "RS", "#d768ba"),
    ])
}

fn offset(today: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        today.checked_add_days(Days::new(days as u64))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(today)
}

#[allow(clippy::too_many_arguments)]
fn task(
    id: u32,
    title: &str,
    description: &str,
    assignees: &[u32],
    due_date: NaiveDate,
    status: TaskStatus,
    recurrence: Recurrence,
    urgency: Option<Urgency>,
) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: description.to_string(),
        assignees: assignees.to_vec(),
        due_date,
        status,
        recurrence,
        urgency,
    }
}

/// Sample chores, dated relative to `today`
pub fn default_tasks(today: NaiveDate) -> Vec<Task> {
    use Recurrence::*;
    use TaskStatus::*;

    let tomorrow = offset(today, 1);
    let two_days = offset(today, 2);
    let three_days = offset(today, 3);
    let next_week = offset(today, 7);
    let yesterday = offset(today, -1);

    vec![
        task(1, "Take out garbage ♻️", "Take bins to curb by 7 PM", &[4, 5], today, Pending, Weekly, Some(Urgency::High)),
        task(2, "Clean kitchen🧹", "Deep clean kitchen counters and stove", &[2], today, Pending, OneTime, Some(Urgency::Moderate)),
        task(3, "Vacuum living room🧹", "Deep Clean the living room", &[1, 3], tomorrow, Pending, OneTime, None),
        task(4, "Buy groceries🛒", "Get milk, bread, eggs, and vegetables", &[1, 3, 4], two_days, Pending, OneTime, Some(Urgency::Low)),
        task(5, "Water plants🪴", "Water all indoor plants", &[5], next_week, Completed, Weekly, None),
        task(6, "Clean bathroom🚻", "Scrub shower and clean mirrors", &[2, 4, 3], yesterday, Pending, OneTime, Some(Urgency::High)),
        task(7, "Pay rent💰", "", &[2], three_days, Pending, Monthly, Some(Urgency::High)),
        task(8, "Organize pantry🍞", "", &[1], next_week, Pending, OneTime, None),
        task(9, "Shovel driveway❄️", "", &[5], next_week, Pending, OneTime, Some(Urgency::Moderate)),
    ]
}

fn expense(
    id: u32,
    description: &str,
    amount: f64,
    payer: &str,
    participants: &[&str],
    date: (i32, u32, u32),
    status: ExpenseStatus,
) -> Expense {
    Expense {
        id,
        description: description.to_string(),
        amount,
        payer: payer.to_string(),
        participants: participants.iter().map(|p| p.to_string()).collect(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
        status,
    }
}

pub fn default_expenses() -> Vec<Expense> {
    use ExpenseStatus::*;
    const EVERYONE: [&str; 5] = [
        "Janvi Chauhan",
        "Aranya Chaudhary",
        "Tamilla Zeynalova",
        "Aaish Ahmed",
        "Rami Abu Sultan",
    ];
    vec![
        expense(1, "Groceries at Metro🛒", 87.50, "Janvi Chauhan", &EVERYONE, (2024, 11, 15), Pending),
        expense(2, "Internet Bill🧾", 60.00, "Aranya Chaudhary", &EVERYONE, (2024, 11, 14), Settled),
        expense(3, "Cleaning Supplies🛒", 42.30, "Tamilla Zeynalova", &EVERYONE, (2024, 11, 13), Pending),
        expense(4, "House Party Snacks🛒", 95.20, "Janvi Chauhan", &EVERYONE, (2024, 11, 12), Settled),
        expense(5, "Electricity Bill🧾", 120.00, "Aaish Ahmed", &EVERYONE, (2024, 11, 10), Pending),
        expense(
            6,
            "Shared Uber🚕",
            28.50,
            "Aranya Chaudhary",
            &["Janvi Chauhan", "Aranya Chaudhary", "Tamilla Zeynalova", "Rami Abu Sultan"],
            (2024, 11, 9),
            Settled,
        ),
    ]
}

fn conversation(
    id: u32,
    name: &str,
    kind: ConversationKind,
    participants: &[u32],
    preview: &str,
    activity: &str,
    unread: u32,
) -> Conversation {
    Conversation {
        id,
        name: name.to_string(),
        kind,
        participants: participants.to_vec(),
        last_message_preview: preview.to_string(),
        last_activity_label: activity.to_string(),
        unread_count: unread,
    }
}

pub fn default_conversations() -> Vec<Conversation> {
    use ConversationKind::*;
    vec![
        conversation(1, "Good Vibes only", Group, &[1, 2, 3, 4, 5], "Aaish: Anyone free this weekend?", "10:30 AM", 2),
        conversation(2, "Aranya Chaudhary", Direct, &[1, 2], "You: Sounds good👍🏻!", "Yesterday", 0),
        conversation(3, "Tamilla Zeynalova", Direct, &[1, 3], "Tamilla: Thanks for cleaning!✌🏻", "2 days ago", 0),
        conversation(4, "Bills & Expenses", Group, &[1, 2, 3, 4], "You: I paid the electric bill", "3 days ago", 1),
    ]
}

/// Message history per conversation. `current_user` decides `is_own`.
pub fn default_messages(current_user: u32) -> IndexMap<u32, Vec<Message>> {
    let history: [(u32, &[(u32, &str, &str)]); 4] = [
        (
            1,
            &[
                (2, "Hey everyone! Just a reminder about the house meeting tomorrow at 7 PM.", "9:15 AM"),
                (1, "Thanks for the reminder! I'll be there.👍🏻", "9:20 AM"),
                (3, "Count me in too!", "9:45 AM"),
                (4, "Anyone free this weekend? Thinking of organizing a house cleanup.", "10:30 AM"),
                (5, "I can help out on Saturday morning.", "10:45 AM"),
            ],
        ),
        (
            2,
            &[
                (2, "Hey! Are you free to help me move the couch later?", "2:00 PM"),
                (1, "Sure! What time works for you?", "2:15 PM"),
                (2, "How about 5 PM?", "2:20 PM"),
                (1, "Sounds good!👍🏻", "2:22 PM"),
            ],
        ),
        (
            3,
            &[
                (3, "Thanks for cleaning the kitchen yesterday!", "8:00 AM"),
                (1, "No problem! Happy to help.🫶", "8:30 AM"),
                (3, "Let me know if you need help with anything.", "8:45 AM"),
            ],
        ),
        (
            4,
            &[
                (2, "I paid the internet bill. It was $60 this month.", "9:00 AM"),
                (1, "Thanks! I paid the electric bill yesterday, $120.", "10:00 AM"),
                (3, "I'll handle the water bill this week.", "11:00 AM"),
            ],
        ),
    ];

    history
        .iter()
        .map(|(conversation_id, lines)| {
            let messages = lines
                .iter()
                .enumerate()
                .map(|(i, (sender, text, time))| Message {
                    id: i as i64 + 1,
                    conversation_id: *conversation_id,
                    sender_id: *sender,
                    text: text.to_string(),
                    timestamp: time.to_string(),
                    is_own: *sender == current_user,
                })
                .collect();
            (*conversation_id, messages)
        })
        .collect()
}

pub fn default_chat_settings() -> BTreeMap<u32, ChatSetting> {
    BTreeMap::new()
}

fn feed_item(id: u32, kind: FeedKind, title: &str, description: &str, time: &str, status: Option<&str>) -> ActivityFeedItem {
    ActivityFeedItem {
        id,
        kind,
        title: title.to_string(),
        description: description.to_string(),
        time: time.to_string(),
        status: status.map(|s| s.to_string()),
    }
}

pub fn default_feed() -> ActivityFeed {
    use FeedKind::Chat;
    ActivityFeed {
        today: vec![
            feed_item(1, FeedKind::Task, "Task completed", "Tamilla completed \"Clean kitchen🧹\"", "2 hours ago", Some("Done")),
            feed_item(2, FeedKind::Expense, "New expense", "Aranya added \"Groceries - $87.50\"💰", "4 hours ago", Some("Pending")),
        ],
        yesterday: vec![
            feed_item(3, Chat, "New message", "Aaish: \"Anyone want to order pizza🍕?\"", "Yesterday 8:30 PM", None),
            feed_item(4, FeedKind::Task, "Task assigned", "You were assigned \"Take out garbage♻️\"", "Yesterday 6:00 PM", Some("Pending")),
            feed_item(5, FeedKind::Task, "Task completed", "Rami completed \"Clean bathroom🚻\"", "Yesterday 4:30 PM", Some("Done")),
        ],
        this_week: vec![
            feed_item(6, FeedKind::Expense, "Expense settled", "Internet bill was marked as settled🧾", "3 days ago", Some("Settled")),
            feed_item(7, FeedKind::Task, "Recurring task", "Weekly cleaning rotation updated🧹", "4 days ago", None),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_dates_are_relative_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let tasks = default_tasks(today);
        assert_eq!(tasks.len(), 9);
        assert_eq!(tasks[0].due_date, today);
        assert_eq!(tasks[2].due_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(tasks[5].due_date, NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
        assert_eq!(tasks[4].due_date, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
    }

    #[test]
    fn seed_ids_are_unique_and_assignees_nonempty() {
        let today = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
        let tasks = default_tasks(today);
        let mut ids: Vec<u32> = tasks.iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), tasks.len());
        assert!(tasks.iter().all(|t| !t.assignees.is_empty()));
    }

    #[test]
    fn seed_expense_names_are_on_roster() {
        let roster = default_roster();
        for e in default_expenses() {
            assert!(roster.by_name(&e.payer).is_some());
            assert!(e.participants.iter().all(|p| roster.by_name(p).is_some()));
        }
    }

    #[test]
    fn seed_messages_mark_own() {
        let messages = default_messages(1);
        assert_eq!(messages.len(), 4);
        let first = &messages[&1];
        assert!(!first[0].is_own);
        assert!(first[1].is_own);
        assert!(first.iter().all(|m| m.conversation_id == 1));
    }

    #[test]
    fn seed_direct_chats_are_unique_pairs() {
        let conversations = default_conversations();
        let directs: Vec<_> = conversations
            .iter()
            .filter(|c| c.kind == ConversationKind::Direct)
            .collect();
        for (i, a) in directs.iter().enumerate() {
            for b in &directs[i + 1..] {
                let mut pa = a.participants.clone();
                let mut pb = b.participants.clone();
                pa.sort();
                pb.sort();
                assert_ne!(pa, pb);
            }
        }
    }
}
