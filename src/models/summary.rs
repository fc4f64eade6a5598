use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;

/// Income and expense totals with the resulting balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    #[serde(rename = "total_balance")]
    pub balance: Decimal
}

impl Totals {
    pub fn new(total_income: Decimal, total_expense: Decimal) -> Self {
        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense
        }
    }
}

/// Everything the dashboard shows besides the forecast.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// The balance when it is positive, zero otherwise.
    pub balance_pos: Decimal,
    /// The magnitude of the balance when it is negative, zero otherwise.
    pub balance_neg: Decimal,
    pub recent_incomes: Vec<Transaction>,
    pub recent_expenses: Vec<Transaction>
}

impl Summary {
    pub fn new(totals: Totals, recent_incomes: Vec<Transaction>, recent_expenses: Vec<Transaction>) -> Self {
        Self {
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            balance: totals.balance,
            balance_pos: totals.balance.max(Decimal::ZERO),
            balance_neg: totals.balance.min(Decimal::ZERO).abs(),
            recent_incomes,
            recent_expenses
        }
    }
}
