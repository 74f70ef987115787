use chrono::NaiveDate;

use super::{EXPENSES_KEY, EntityKind, EntityStore, StoreError, ValidationError, commit, next_id};
use crate::model::expense::{Expense, ExpenseDraft};

const INCOMPLETE_EXPENSE: &str = "Please fill in all fields and select at least one participant";

struct ValidExpense {
    description: String,
    payer: String,
    participants: Vec<String>,
    date: NaiveDate,
}

impl EntityStore {
    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<Expense, StoreError> {
        let valid = self.validate_expense(&draft).inspect_err(|e| {
            tracing::warn!(field = e.field, "expense rejected");
        })?;
        let expense = Expense {
            id: next_id("expense", self.expenses.iter().map(|e| e.id))?,
            description: valid.description,
            amount: draft.amount,
            payer: valid.payer,
            participants: valid.participants,
            date: valid.date,
            status: draft.status,
        };

        let mut next = self.expenses.clone();
        next.push(expense.clone());
        commit(self.kv.as_mut(), EXPENSES_KEY, &mut self.expenses, next)?;
        tracing::info!(
            id = expense.id,
            amount = expense.amount,
            status = expense.status.as_str(),
            "expense added"
        );
        Ok(expense)
    }

    /// Replace every field of expense `id`, status included.
    pub fn edit_expense(&mut self, id: u32, draft: ExpenseDraft) -> Result<Expense, StoreError> {
        let index = self.expense_index(id)?;
        let valid = self.validate_expense(&draft).inspect_err(|e| {
            tracing::warn!(id, field = e.field, "expense edit rejected");
        })?;

        let mut next = self.expenses.clone();
        next[index] = Expense {
            id,
            description: valid.description,
            amount: draft.amount,
            payer: valid.payer,
            participants: valid.participants,
            date: valid.date,
            status: draft.status,
        };
        let updated = next[index].clone();

        commit(self.kv.as_mut(), EXPENSES_KEY, &mut self.expenses, next)?;
        tracing::info!(id, "expense updated");
        Ok(updated)
    }

    pub fn delete_expense(&mut self, id: u32) -> Result<Expense, StoreError> {
        let index = self.expense_index(id)?;
        let mut next = self.expenses.clone();
        let removed = next.remove(index);
        commit(self.kv.as_mut(), EXPENSES_KEY, &mut self.expenses, next)?;
        tracing::info!(id, "expense deleted");
        Ok(removed)
    }

    fn expense_index(&self, id: u32) -> Result<usize, StoreError> {
        self.expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::missing(EntityKind::Expense, id))
    }

    fn validate_expense(&self, draft: &ExpenseDraft) -> Result<ValidExpense, ValidationError> {
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(ValidationError::new("description", INCOMPLETE_EXPENSE));
        }
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(ValidationError::new(
                "amount",
                "Amount must be greater than zero",
            ));
        }

        let payer = draft.payer.trim();
        if payer.is_empty() {
            return Err(ValidationError::new("payer", INCOMPLETE_EXPENSE));
        }
        if self.roster.by_name(payer).is_none() {
            return Err(ValidationError::new(
                "payer",
                format!("Unknown roommate: {}", payer),
            ));
        }

        let mut participants: Vec<String> = Vec::with_capacity(draft.participants.len());
        for name in &draft.participants {
            let name = name.trim();
            if self.roster.by_name(name).is_none() {
                return Err(ValidationError::new(
                    "participants",
                    format!("Unknown roommate: {}", name),
                ));
            }
            if !participants.iter().any(|p| p == name) {
                participants.push(name.to_string());
            }
        }
        if participants.is_empty() {
            return Err(ValidationError::new("participants", INCOMPLETE_EXPENSE));
        }

        let Some(date) = draft.date else {
            return Err(ValidationError::new("date", INCOMPLETE_EXPENSE));
        };

        Ok(ValidExpense {
            description: description.to_string(),
            payer: payer.to_string(),
            participants,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::model::expense::ExpenseStatus;
    use pretty_assertions::assert_eq;

    fn draft(description: &str, amount: f64, participants: &[&str]) -> ExpenseDraft {
        ExpenseDraft {
            description: description.into(),
            amount,
            payer: "Janvi Chauhan".into(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
            date: Some(today()),
            status: ExpenseStatus::Pending,
        }
    }

    fn field_of(err: StoreError) -> &'static str {
        match err {
            StoreError::Validation(v) => v.field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn add_persists_and_restores_exactly() {
        let mut store = store();
        let expense = store
            .add_expense(draft(
                "Dish soap",
                12.34,
                &["Janvi Chauhan", "Aaish Ahmed", "Janvi Chauhan"],
            ))
            .unwrap();
        assert_eq!(expense.id, 7);
        assert_eq!(expense.participants, vec!["Janvi Chauhan", "Aaish Ahmed"]);

        let saved: Vec<Expense> = persisted(&store, EXPENSES_KEY);
        assert_eq!(saved, store.expenses().to_vec());
        assert_eq!(saved.last().map(|e| e.amount), Some(12.34));
    }

    #[test]
    fn payer_need_not_participate() {
        let mut store = store();
        let expense = store.add_expense(draft("Gift", 40.0, &["Aaish Ahmed"])).unwrap();
        assert_eq!(expense.payer, "Janvi Chauhan");
        assert!(!expense.includes("Janvi Chauhan"));
    }

    #[test]
    fn validation_names_the_field() {
        let mut store = store();
        let before = store.expenses().to_vec();
        let everyone = ["Janvi Chauhan"];

        assert_eq!(field_of(store.add_expense(draft(" ", 5.0, &everyone)).unwrap_err()), "description");
        assert_eq!(field_of(store.add_expense(draft("x", 0.0, &everyone)).unwrap_err()), "amount");
        assert_eq!(field_of(store.add_expense(draft("x", -3.0, &everyone)).unwrap_err()), "amount");
        assert_eq!(field_of(store.add_expense(draft("x", f64::NAN, &everyone)).unwrap_err()), "amount");
        assert_eq!(field_of(store.add_expense(draft("x", 5.0, &[])).unwrap_err()), "participants");
        assert_eq!(
            field_of(store.add_expense(draft("x", 5.0, &["Nobody"])).unwrap_err()),
            "participants"
        );

        let mut bad_payer = draft("x", 5.0, &everyone);
        bad_payer.payer = "Nobody".into();
        assert_eq!(field_of(store.add_expense(bad_payer).unwrap_err()), "payer");

        let mut no_date = draft("x", 5.0, &everyone);
        no_date.date = None;
        assert_eq!(field_of(store.add_expense(no_date).unwrap_err()), "date");

        assert_eq!(store.expenses(), before.as_slice());
    }

    #[test]
    fn edit_replaces_fields_including_status() {
        let mut store = store();
        let mut update = draft("Groceries", 90.0, &["Janvi Chauhan", "Aaish Ahmed"]);
        update.status = ExpenseStatus::Settled;
        let edited = store.edit_expense(1, update).unwrap();
        assert_eq!(edited.id, 1);
        assert_eq!(edited.status, ExpenseStatus::Settled);
        assert_eq!(store.expense(1), Some(&edited));
    }

    #[test]
    fn delete_and_missing_ids() {
        let mut store = store();
        let removed = store.delete_expense(2).unwrap();
        assert_eq!(removed.id, 2);
        assert!(store.expense(2).is_none());
        assert!(matches!(
            store.delete_expense(2).unwrap_err(),
            StoreError::InvalidReference {
                kind: EntityKind::Expense,
                id: 2
            }
        ));
        assert!(matches!(
            store.edit_expense(50, draft("x", 1.0, &["Janvi Chauhan"])).unwrap_err(),
            StoreError::InvalidReference { .. }
        ));
    }

    #[test]
    fn failed_write_leaves_expenses_untouched() {
        let mut store = failing_store();
        let before = store.expenses().to_vec();
        let err = store.add_expense(draft("x", 5.0, &["Janvi Chauhan"])).unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert!(store.delete_expense(1).is_err());
        assert_eq!(store.expenses(), before.as_slice());
    }
}
