use serde::Serialize;

use crate::model::expense::{Expense, ExpenseStatus};

/// What the current user is owed and owes across pending expenses.
/// The two figures are never netted against each other.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BalanceSummary {
    /// Sum of other participants' shares on expenses the user paid
    pub owed: f64,
    /// Sum of the user's shares on expenses someone else paid
    pub owing: f64,
}

impl BalanceSummary {
    pub fn owed_label(&self) -> String {
        format_money(self.owed)
    }

    pub fn owing_label(&self) -> String {
        format_money(self.owing)
    }
}

/// Compute balances for `current_user` (a roster display name).
pub fn compute_balances(expenses: &[Expense], current_user: &str) -> BalanceSummary {
    let mut summary = BalanceSummary::default();
    for expense in expenses {
        if expense.status != ExpenseStatus::Pending || expense.participants.is_empty() {
            continue;
        }
        let share = expense.share();
        let user_participates = expense.includes(current_user);

        if expense.payer == current_user {
            let others = expense
                .participants
                .iter()
                .filter(|p| p.as_str() != current_user)
                .count();
            summary.owed += share * others as f64;
        } else if user_participates {
            summary.owing += share;
        }
    }
    summary
}

/// Currency with two decimals, e.g. `$17.50`
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn expense(amount: f64, payer: &str, participants: &[&str], status: ExpenseStatus) -> Expense {
        Expense {
            id: 1,
            description: "x".into(),
            amount,
            payer: payer.into(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
            date: NaiveDate::from_ymd_opt(2024, 11, 15).unwrap(),
            status,
        }
    }

    #[test]
    fn payer_is_owed_other_shares() {
        let e = vec![expense(100.0, "A", &["A", "B", "C", "D"], ExpenseStatus::Pending)];
        assert_eq!(
            compute_balances(&e, "A"),
            BalanceSummary {
                owed: 75.0,
                owing: 0.0
            }
        );
    }

    #[test]
    fn participant_owes_one_share() {
        let e = vec![expense(100.0, "A", &["A", "B", "C", "D"], ExpenseStatus::Pending)];
        assert_eq!(
            compute_balances(&e, "B"),
            BalanceSummary {
                owed: 0.0,
                owing: 25.0
            }
        );
    }

    #[test]
    fn payer_outside_participants_is_owed_everything() {
        let e = vec![expense(90.0, "A", &["B", "C", "D"], ExpenseStatus::Pending)];
        assert_eq!(compute_balances(&e, "A").owed, 90.0);
    }

    #[test]
    fn bystander_has_no_balance() {
        let e = vec![expense(90.0, "A", &["B", "C"], ExpenseStatus::Pending)];
        assert_eq!(compute_balances(&e, "D"), BalanceSummary::default());
    }

    #[test]
    fn settled_expenses_are_ignored() {
        let e = vec![
            expense(100.0, "A", &["A", "B"], ExpenseStatus::Settled),
            expense(40.0, "B", &["A", "B"], ExpenseStatus::Settled),
        ];
        assert_eq!(compute_balances(&e, "A"), BalanceSummary::default());
    }

    #[test]
    fn owed_and_owing_accumulate_without_netting() {
        let e = vec![
            expense(100.0, "A", &["A", "B"], ExpenseStatus::Pending),
            expense(60.0, "B", &["A", "B", "C"], ExpenseStatus::Pending),
        ];
        let s = compute_balances(&e, "A");
        assert_eq!(s.owed, 50.0);
        assert_eq!(s.owing, 20.0);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let e = vec![
            expense(87.5, "A", &["A", "B", "C", "D", "E"], ExpenseStatus::Pending),
            expense(42.3, "C", &["A", "B", "C", "D", "E"], ExpenseStatus::Pending),
        ];
        assert_eq!(compute_balances(&e, "A"), compute_balances(&e, "A"));
    }

    #[test]
    fn labels_have_two_decimals() {
        let s = BalanceSummary {
            owed: 70.0,
            owing: 32.46,
        };
        assert_eq!(s.owed_label(), "$70.00");
        assert_eq!(s.owing_label(), "$32.46");
        assert_eq!(format_money(8.456), "$8.46");
    }
}
