use crate::common::money::Money;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Assigned by the service, strictly increasing.
    pub id: i64,
    /// Unique across the ledger.
    pub phone: String,
    /// Never negative after a successful operation.
    pub balance: Money,
}

impl Account {
    pub fn new(id: i64, phone: impl Into<String>) -> Self {
        Self {
            id,
            phone: phone.into(),
            balance: Money::zero(),
        }
    }

    pub fn can_afford(&self, amount: Money) -> bool {
        self.balance >= amount
    }
}
