use crate::model::{Amount, Category};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a single purchase event.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    id: u64,
    merchant: String,
    amount: Amount,
    category: Category,
    date: NaiveDate,
    description: String,
    /// Whether the purchase was paid with the tracked card.
    tracked_card: bool,
}

impl Transaction {
    pub fn new(
        id: u64,
        merchant: impl Into<String>,
        amount: impl Into<Amount>,
        category: impl Into<Category>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            merchant: merchant.into(),
            amount: amount.into(),
            category: category.into(),
            date,
            description: String::new(),
            tracked_card: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tracked_card(mut self, tracked_card: bool) -> Self {
        self.tracked_card = tracked_card;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tracked_card(&self) -> bool {
        self.tracked_card
    }
}
