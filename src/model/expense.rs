use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpenseStatus {
    #[default]
    Pending,
    Settled,
}

impl ExpenseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "Pending",
            ExpenseStatus::Settled => "Settled",
        }
    }
}

/// A shared purchase split equally among its participants.
///
/// Payer and participants are roommate display names, matching the
/// persisted document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: u32,
    pub description: String,
    pub amount: f64,
    pub payer: String,
    pub participants: Vec<String>,
    pub date: NaiveDate,
    pub status: ExpenseStatus,
}

impl Expense {
    /// Equal share of the amount per participant
    pub fn share(&self) -> f64 {
        if self.participants.is_empty() {
            return 0.0;
        }
        self.amount / self.participants.len() as f64
    }

    pub fn includes(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }
}

/// User-supplied fields for creating or editing an expense
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub payer: String,
    pub participants: Vec<String>,
    pub date: Option<NaiveDate>,
    pub status: ExpenseStatus,
}

impl ExpenseDraft {
    pub fn from_expense(expense: &Expense) -> Self {
        ExpenseDraft {
            description: expense.description.clone(),
            amount: expense.amount,
            payer: expense.payer.clone(),
            participants: expense.participants.clone(),
            date: Some(expense.date),
            status: expense.status,
        }
    }
}
