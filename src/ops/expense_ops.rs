use chrono::NaiveDate;
use serde::Serialize;

use crate::model::expense::{Expense, ExpenseStatus};
use crate::model::roommate::Roster;
use crate::ops::balance::format_money;
use crate::util::dates::format_date;

/// One row of the expense list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRow {
    pub id: u32,
    pub description: String,
    pub amount: f64,
    pub amount_label: String,
    pub payer_name: String,
    pub payer_initials: String,
    pub participant_count: usize,
    pub split_label: String,
    pub date: NaiveDate,
    pub date_label: String,
    pub status: ExpenseStatus,
}

/// Expenses newest first; equal dates keep collection order.
pub fn expense_rows(expenses: &[Expense], roster: &Roster, today: NaiveDate) -> Vec<ExpenseRow> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
        .into_iter()
        .map(|e| {
            let (payer_name, payer_initials) = match roster.by_name(&e.payer) {
                Some(r) => (r.name.clone(), r.initials.clone()),
                None => (e.payer.clone(), fallback_initials(&e.payer)),
            };
            ExpenseRow {
                id: e.id,
                description: e.description.clone(),
                amount: e.amount,
                amount_label: format_money(e.amount),
                payer_name,
                payer_initials,
                participant_count: e.participants.len(),
                split_label: split_label(e.participants.len()),
                date: e.date,
                date_label: format_date(e.date, today),
                status: e.status,
            }
        })
        .collect()
}

/// "Split between 1 person" / "Split between 4 people"
pub fn split_label(count: usize) -> String {
    let noun = if count == 1 { "person" } else { "people" };
    format!("Split between {} {}", count, noun)
}

fn fallback_initials(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}
