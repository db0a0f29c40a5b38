//! Types that represent the core data model, such as `Transaction` and `Category`.
mod amount;
mod category;
mod transaction;

pub use amount::Amount;
pub use category::{Category, CategoryKind};
pub use transaction::Transaction;
