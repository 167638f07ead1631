use crate::common::money::Money;

/// Reusable payment template, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: String,
    pub account_id: i64,
    pub name: String,
    pub amount: Money,
    pub category: String,
}
