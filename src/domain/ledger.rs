use std::collections::HashMap;

use crate::domain::{account::Account, favorite::Favorite, payment::Payment};

/// In-memory store of accounts, payments and favorites.
///
/// Each collection keeps insertion order (dumps and shard boundaries depend
/// on it) and an id index for lookups. Records are never removed.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: Vec<Account>,
    account_index: HashMap<i64, usize>,
    payments: Vec<Payment>,
    payment_index: HashMap<String, usize>,
    favorites: Vec<Favorite>,
    favorite_index: HashMap<String, usize>,
    /// Last assigned account id; never below the largest stored id.
    last_account_id: i64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn last_account_id(&self) -> i64 {
        self.last_account_id
    }

    /// Advances the counter and returns the new id.
    pub fn next_account_id(&mut self) -> i64 {
        self.last_account_id += 1;
        self.last_account_id
    }

    pub fn phone_registered(&self, phone: &str) -> bool {
        self.accounts.iter().any(|acc| acc.phone == phone)
    }

    pub fn account(&self, id: i64) -> Option<&Account> {
        self.account_index.get(&id).map(|&i| &self.accounts[i])
    }

    pub fn account_mut(&mut self, id: i64) -> Option<&mut Account> {
        let i = *self.account_index.get(&id)?;
        self.accounts.get_mut(i)
    }

    pub fn payment(&self, id: &str) -> Option<&Payment> {
        self.payment_index.get(id).map(|&i| &self.payments[i])
    }

    pub fn payment_mut(&mut self, id: &str) -> Option<&mut Payment> {
        let i = *self.payment_index.get(id)?;
        self.payments.get_mut(i)
    }

    pub fn favorite(&self, id: &str) -> Option<&Favorite> {
        self.favorite_index.get(id).map(|&i| &self.favorites[i])
    }

    /// Appends the account unless its id is taken. The counter is raised to
    /// cover the id so later registrations stay unique.
    pub fn insert_account(&mut self, account: Account) -> bool {
        if self.account_index.contains_key(&account.id) {
            return false;
        }
        self.last_account_id = self.last_account_id.max(account.id);
        self.account_index.insert(account.id, self.accounts.len());
        self.accounts.push(account);
        true
    }

    /// Appends the payment unless its id is taken.
    pub fn insert_payment(&mut self, payment: Payment) -> bool {
        if self.payment_index.contains_key(&payment.id) {
            return false;
        }
        self.payment_index
            .insert(payment.id.clone(), self.payments.len());
        self.payments.push(payment);
        true
    }

    /// Appends the favorite unless its id is taken.
    pub fn insert_favorite(&mut self, favorite: Favorite) -> bool {
        if self.favorite_index.contains_key(&favorite.id) {
            return false;
        }
        self.favorite_index
            .insert(favorite.id.clone(), self.favorites.len());
        self.favorites.push(favorite);
        true
    }
}
