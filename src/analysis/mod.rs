//! The spending aggregator and the insight report built on top of it.
//!
//! `aggregate` reduces a list of transactions to per-category totals, the dominant category and a
//! monthly average. It is pure and synchronous; callers recompute it whenever they need it.

mod insights;

pub use insights::{analyze, Analysis, BreakdownRow, Insight, InsightGroup, INSIGHT_GROUPS};

use crate::model::{Amount, Category, Transaction};
use serde::Serialize;
use std::num::NonZeroU32;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Cannot aggregate an empty list of transactions")]
    EmptyInput,

    #[error("The total spent overflowed after {count} transactions")]
    Overflow { count: usize },
}

pub type AggregateResult<T> = Result<T, AggregateError>;

/// The running total for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    category: Category,
    amount: Amount,
    /// The number of transactions that contributed to `amount`.
    count: usize,
}

impl CategoryTotal {
    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// The result of `aggregate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    total_spent: Amount,
    /// Category totals in the order each category was first encountered.
    per_category: Vec<CategoryTotal>,
    dominant_category: Category,
    monthly_average: Amount,
}

impl Aggregation {
    pub fn total_spent(&self) -> Amount {
        self.total_spent
    }

    pub fn per_category(&self) -> &[CategoryTotal] {
        &self.per_category
    }

    pub fn dominant_category(&self) -> &Category {
        &self.dominant_category
    }

    pub fn monthly_average(&self) -> Amount {
        self.monthly_average
    }

    /// The summed amount for `category`, or `None` if no transaction had that category.
    pub fn total_for(&self, category: &str) -> Option<Amount> {
        self.per_category
            .iter()
            .find(|t| t.category.as_str() == category)
            .map(|t| t.amount)
    }

    /// The whole-percent share of the total attributable to `category`. Absent categories are 0%.
    pub fn share(&self, category: &str) -> u32 {
        self.total_for(category)
            .unwrap_or_default()
            .percent_of(self.total_spent)
    }
}

/// Reduces `transactions` into totals.
///
/// The dominant category is the one with the greatest total; when two categories tie, the one
/// that appeared first in `transactions` wins. `monthly_average` is `total_spent / period_count`
/// rounded to the nearest whole unit.
///
/// # Errors
/// - `AggregateError::EmptyInput` if `transactions` is empty
/// - `AggregateError::Overflow` if the total does not fit in an `Amount`
pub fn aggregate(
    transactions: &[Transaction],
    period_count: NonZeroU32,
) -> AggregateResult<Aggregation> {
    if transactions.is_empty() {
        return Err(AggregateError::EmptyInput);
    }

    let mut total_spent = Amount::ZERO;
    let mut per_category: Vec<CategoryTotal> = Vec::new();

    for (ix, transaction) in transactions.iter().enumerate() {
        let overflow = || AggregateError::Overflow { count: ix + 1 };
        total_spent = total_spent
            .checked_add(transaction.amount())
            .ok_or_else(overflow)?;

        match per_category
            .iter_mut()
            .find(|t| &t.category == transaction.category())
        {
            Some(entry) => {
                // Cannot overflow if the grand total did not.
                entry.amount = entry
                    .amount
                    .checked_add(transaction.amount())
                    .ok_or_else(overflow)?;
                entry.count += 1;
            }
            None => per_category.push(CategoryTotal {
                category: transaction.category().clone(),
                amount: transaction.amount(),
                count: 1,
            }),
        }
    }

    // Strictly greater, so that ties keep the earliest category.
    let mut dominant = &per_category[0];
    for entry in &per_category[1..] {
        if entry.amount > dominant.amount {
            dominant = entry;
        }
    }
    let dominant_category = dominant.category.clone();

    Ok(Aggregation {
        total_spent,
        monthly_average: total_spent.average_over(period_count),
        dominant_category,
        per_category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(id: u64, category: &str, amount: u64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        Transaction::new(id, format!("merchant-{id}"), amount, category, date)
    }

    fn two() -> NonZeroU32 {
        NonZeroU32::new(2).unwrap()
    }

    #[test]
    fn test_two_food_transactions() {
        let transactions = vec![txn(1, "food", 450), txn(12, "food", 420)];
        let agg = aggregate(&transactions, two()).unwrap();
        assert_eq!(agg.total_spent(), Amount::new(870));
        assert_eq!(agg.per_category().len(), 1);
        assert_eq!(agg.total_for("food"), Some(Amount::new(870)));
        assert_eq!(agg.per_category()[0].count(), 2);
        assert_eq!(agg.dominant_category().as_str(), "food");
        assert_eq!(agg.monthly_average(), Amount::new(435));
        assert_eq!(agg.share("food"), 100);
        assert_eq!(agg.share("shopping"), 0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(aggregate(&[], two()), Err(AggregateError::EmptyInput));
    }

    #[test]
    fn test_tie_prefers_first_seen() {
        let transactions = vec![
            txn(1, "shopping", 100),
            txn(2, "food", 300),
            txn(3, "shopping", 200),
        ];
        let agg = aggregate(&transactions, two()).unwrap();
        assert_eq!(agg.dominant_category().as_str(), "shopping");

        let transactions = vec![txn(1, "food", 300), txn(2, "shopping", 300)];
        let agg = aggregate(&transactions, two()).unwrap();
        assert_eq!(agg.dominant_category().as_str(), "food");
    }

    #[test]
    fn test_order_of_categories_is_first_seen() {
        let transactions = vec![
            txn(1, "transport", 10),
            txn(2, "food", 30),
            txn(3, "transport", 5),
            txn(4, "gaming", 1),
        ];
        let agg = aggregate(&transactions, two()).unwrap();
        let order: Vec<&str> = agg
            .per_category()
            .iter()
            .map(|t| t.category().as_str())
            .collect();
        assert_eq!(order, vec!["transport", "food", "gaming"]);
        assert_eq!(agg.dominant_category().as_str(), "food");
    }

    #[test]
    fn test_unknown_category() {
        let transactions = vec![txn(1, "food", 100), txn(2, "crypto", 500)];
        let agg = aggregate(&transactions, two()).unwrap();
        assert_eq!(agg.total_for("crypto"), Some(Amount::new(500)));
        assert_eq!(agg.dominant_category().as_str(), "crypto");
        assert_eq!(agg.total_spent(), Amount::new(600));
    }

    #[test]
    fn test_period_count() {
        let transactions = vec![txn(1, "food", 1000)];
        let agg = aggregate(&transactions, NonZeroU32::new(3).unwrap()).unwrap();
        assert_eq!(agg.monthly_average(), Amount::new(333));
        let agg = aggregate(&transactions, NonZeroU32::MIN).unwrap();
        assert_eq!(agg.monthly_average(), Amount::new(1000));
    }

    #[test]
    fn test_zero_amounts() {
        let transactions = vec![txn(1, "food", 0), txn(2, "shopping", 0)];
        let agg = aggregate(&transactions, two()).unwrap();
        assert_eq!(agg.total_spent(), Amount::ZERO);
        assert_eq!(agg.dominant_category().as_str(), "food");
        assert_eq!(agg.share("food"), 0);
    }

    #[test]
    fn test_overflow() {
        let transactions = vec![txn(1, "food", u64::MAX), txn(2, "food", 1)];
        assert_eq!(
            aggregate(&transactions, two()),
            Err(AggregateError::Overflow { count: 2 })
        );
    }
}
