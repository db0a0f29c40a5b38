//! Where transactions come from.
//!
//! The app only ever shows the fixed mock history. The `TransactionSource` trait is the seam a
//! real transaction-history provider would plug into.

use crate::model::Transaction;
use chrono::NaiveDate;

/// Produces a sequence of transactions on demand, most recent first.
pub trait TransactionSource {
    fn transactions(&self) -> Vec<Transaction>;

    /// The most recent transaction, if there is one.
    fn latest(&self) -> Option<Transaction> {
        self.transactions().into_iter().next()
    }
}

/// The statically supplied mock history.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockTransactions;

impl TransactionSource for MockTransactions {
    fn transactions(&self) -> Vec<Transaction> {
        vec![
            Transaction::new(1, "Zomato", 450, "food", date(2024, 9, 24))
                .with_description("Biryani + Coke")
                .with_tracked_card(true),
            Transaction::new(12, "KFC", 420, "food", date(2024, 9, 18))
                .with_description("Zinger Burger Combo")
                .with_tracked_card(true),
        ]
    }
}

impl TransactionSource for Vec<Transaction> {
    fn transactions(&self) -> Vec<Transaction> {
        self.clone()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;

    #[test]
    fn test_mock_history() {
        let transactions = MockTransactions.transactions();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].merchant(), "Zomato");
        assert_eq!(transactions[1].amount(), Amount::new(420));
        assert_eq!(transactions[1].date(), date(2024, 9, 18));
        assert!(transactions.iter().all(|t| t.tracked_card()));
    }

    #[test]
    fn test_latest() {
        let latest = MockTransactions.latest().unwrap();
        assert_eq!(latest.id(), 1);
        assert!(Vec::<Transaction>::new().latest().is_none());
    }
}
