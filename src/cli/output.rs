use serde::Serialize;

use crate::model::chat::ConversationKind;
use crate::model::expense::ExpenseStatus;
use crate::model::task::Recurrence;
use crate::model::roommate::{Roommate, Roster};
use crate::ops::balance::BalanceSummary;
use crate::ops::calendar::{CalendarCell, CalendarGrid, WEEKDAY_HEADINGS};
use crate::ops::chat_ops::{ConversationRow, DirectCandidate, MessageRow};
use crate::ops::expense_ops::ExpenseRow;
use crate::ops::feed::FeedSection;
use crate::ops::task_filter::DisplayTask;
use crate::util::unicode::{pad_left_to_width, pad_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RoommateJson<'a> {
    #[serde(flatten)]
    pub roommate: &'a Roommate,
    pub is_current_user: bool,
}

#[derive(Serialize)]
pub struct BalanceJson {
    pub owed: f64,
    pub owing: f64,
    pub owed_label: String,
    pub owing_label: String,
}

#[derive(Serialize)]
pub struct CalendarJson<'a> {
    pub title: String,
    pub weekdays: [&'static str; 7],
    pub weeks: &'a [Vec<CalendarCell>],
}

#[derive(Serialize)]
pub struct ChatsJson {
    pub conversations: Vec<ConversationRow>,
    pub candidates: Vec<DirectCandidate>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn balance_to_json(summary: &BalanceSummary) -> BalanceJson {
    BalanceJson {
        owed: summary.owed,
        owing: summary.owing,
        owed_label: summary.owed_label(),
        owing_label: summary.owing_label(),
    }
}

pub fn calendar_to_json(grid: &CalendarGrid) -> CalendarJson<'_> {
    CalendarJson {
        title: grid.title(),
        weekdays: WEEKDAY_HEADINGS,
        weeks: &grid.weeks,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

pub fn format_roommate_line(roommate: &Roommate, current_user: u32) -> String {
    let you = if roommate.id == current_user { " (you)" } else { "" };
    format!("{:>3}  {}  {}{}", roommate.id, roommate.initials, roommate.name, you)
}

/// One-line task summary: checkbox, id, title, date pill, repeat, urgency, assignees
pub fn format_task_line(task: &DisplayTask, roster: &Roster) -> String {
    let check = if task.task.is_completed() { 'x' } else { ' ' };
    let repeat = match task.task.recurrence {
        Recurrence::OneTime => String::new(),
        other => format!("  ~{}", other.as_str()),
    };
    let urgency = task
        .urgency_badge
        .map(|b| format!("  !{}", b.label.to_lowercase()))
        .unwrap_or_default();
    let assignees = task
        .task
        .assignees
        .iter()
        .map(|id| roster.by_id(*id).map_or("??", |r| r.initials.as_str()))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "[{}] {} {}  {}{}{}  {}",
        check,
        pad_left_to_width(&task.task.id.to_string(), 3),
        task.task.title,
        task.date_label,
        repeat,
        urgency,
        assignees
    )
}

pub fn format_empty_state(heading: &str, hint: &str) -> Vec<String> {
    vec![heading.to_string(), format!("  {}", hint)]
}

pub fn format_expense_line(row: &ExpenseRow) -> String {
    let settled = match row.status {
        ExpenseStatus::Settled => "  (settled)",
        ExpenseStatus::Pending => "",
    };
    format!(
        "{} {}  {}  paid by {} · {} · {}{}",
        pad_left_to_width(&row.id.to_string(), 3),
        row.description,
        row.amount_label,
        row.payer_initials,
        row.date_label,
        row.split_label,
        settled
    )
}

/// Two-line balance card
pub fn format_balance(summary: &BalanceSummary) -> Vec<String> {
    vec![
        format!("{}{}", pad_to_width("You are owed", 14), summary.owed_label()),
        format!("{}{}", pad_to_width("You owe", 14), summary.owing_label()),
    ]
}

/// Month grid. Today is bracketed; `*` marks a day with a task due.
pub fn format_calendar(grid: &CalendarGrid) -> Vec<String> {
    let mut lines = vec![grid.title()];
    let heading: String = WEEKDAY_HEADINGS.iter().map(|h| format!(" {} ", h)).collect();
    lines.push(heading.trim_end().to_string());
    for week in &grid.weeks {
        let row: String = week.iter().map(format_calendar_cell).collect();
        lines.push(row.trim_end().to_string());
    }
    lines
}

fn format_calendar_cell(cell: &CalendarCell) -> String {
    if !cell.is_current_month {
        return " ".repeat(5);
    }
    let open = if cell.is_today { '[' } else { ' ' };
    let tail = match (cell.is_today, cell.has_task_due) {
        (true, true) => "]*",
        (true, false) => "] ",
        (false, true) => "* ",
        (false, false) => "  ",
    };
    format!("{}{:>2}{}", open, cell.day_number, tail)
}

pub fn format_conversation_line(row: &ConversationRow) -> String {
    let kind = match row.kind {
        ConversationKind::Direct => "@",
        ConversationKind::Group => "#",
    };
    let badge = row.unread_badge.map(|n| format!(" ({})", n)).unwrap_or_default();
    let muted = if row.muted { " [muted]" } else { "" };
    format!(
        "{} {}{}{}{}  {}  · {}",
        pad_left_to_width(&row.id.to_string(), 3),
        kind,
        row.name,
        badge,
        muted,
        row.preview,
        row.activity
    )
}

pub fn format_message_line(row: &MessageRow) -> String {
    let who = if row.is_own { "You" } else { row.sender_name.as_str() };
    format!("{}  {}: {}", pad_left_to_width(&row.time, 8), who, row.text)
}

pub fn format_feed(sections: &[FeedSection<'_>]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("== {} ==", section.title));
        for item in section.items {
            let status = item
                .status
                .as_ref()
                .map(|s| format!(" [{}]", s))
                .unwrap_or_default();
            lines.push(format!("  {}{}: {}  ({})", item.title, status, item.description, item.time));
        }
    }
    lines
}
