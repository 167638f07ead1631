use std::path::Path;
use std::sync::mpsc::Receiver;

use crate::{
    common::{
        config::WalletConfig,
        error::WalletError,
        id::{IdGenerator, UuidGenerator},
        money::Money,
    },
    domain::{account::Account, favorite::Favorite, ledger::Ledger, payment::Payment},
    io::{dump, history},
    service::handlers::{deposit, favorite, pay, pay_favorite, register, reject, repeat},
    worker::{filter, progress, sum},
};

/// Wallet service: accounts, payments and favorites kept in memory.
///
/// Mutating operations take `&mut self`, so callers are serialized by the
/// borrow checker. Each one either applies all of its effects or returns an
/// error with the ledger untouched. Aggregations take `&self` and share the
/// payment log read-only across their workers.
pub struct Service {
    ledger: Ledger,
    ids: Box<dyn IdGenerator>,
    config: WalletConfig,
}

impl Default for Service {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("ledger", &self.ledger)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Service {
    pub fn new() -> Self {
        Self::with_config(WalletConfig::default())
    }

    pub fn with_config(config: WalletConfig) -> Self {
        Self {
            ledger: Ledger::new(),
            ids: Box::new(UuidGenerator),
            config,
        }
    }

    /// Replaces the identity source for payments and favorites.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn register_account(&mut self, phone: &str) -> Result<Account, WalletError> {
        register::handle(&mut self.ledger, phone)
    }

    pub fn deposit(&mut self, account_id: i64, amount: Money) -> Result<(), WalletError> {
        deposit::handle(&mut self.ledger, account_id, amount)
    }

    pub fn pay(
        &mut self,
        account_id: i64,
        amount: Money,
        category: &str,
    ) -> Result<Payment, WalletError> {
        pay::handle(&mut self.ledger, self.ids.as_mut(), account_id, amount, category)
    }

    pub fn find_account_by_id(&self, account_id: i64) -> Result<&Account, WalletError> {
        self.ledger
            .account(account_id)
            .ok_or(WalletError::AccountNotFound(account_id))
    }

    pub fn find_payment_by_id(&self, payment_id: &str) -> Result<&Payment, WalletError> {
        self.ledger
            .payment(payment_id)
            .ok_or_else(|| WalletError::PaymentNotFound(payment_id.to_string()))
    }

    pub fn find_favorite_by_id(&self, favorite_id: &str) -> Result<&Favorite, WalletError> {
        self.ledger
            .favorite(favorite_id)
            .ok_or_else(|| WalletError::FavoriteNotFound(favorite_id.to_string()))
    }

    pub fn reject(&mut self, payment_id: &str) -> Result<(), WalletError> {
        reject::handle(&mut self.ledger, payment_id)
    }

    pub fn repeat(&mut self, payment_id: &str) -> Result<Payment, WalletError> {
        repeat::handle(&mut self.ledger, self.ids.as_mut(), payment_id)
    }

    pub fn favorite_payment(
        &mut self,
        payment_id: &str,
        name: &str,
    ) -> Result<Favorite, WalletError> {
        favorite::handle(&mut self.ledger, self.ids.as_mut(), payment_id, name)
    }

    pub fn pay_from_favorite(&mut self, favorite_id: &str) -> Result<Payment, WalletError> {
        pay_favorite::handle(&mut self.ledger, self.ids.as_mut(), favorite_id)
    }

    /// Sum of all payment amounts, whatever their status.
    pub fn sum_payments(&self, workers: usize) -> Money {
        sum::sum_payments(self.ledger.payments(), workers)
    }

    /// Payments of one account. Order across shards is not preserved.
    pub fn filter_payments(
        &self,
        account_id: i64,
        workers: usize,
    ) -> Result<Vec<Payment>, WalletError> {
        self.find_account_by_id(account_id)?;
        Ok(filter::filter_by_account(
            self.ledger.payments(),
            account_id,
            workers,
        ))
    }

    pub fn filter_payments_by_fn<F>(&self, predicate: F, workers: usize) -> Vec<Payment>
    where
        F: Fn(&Payment) -> bool + Sync,
    {
        filter::filter_payments_by_fn(self.ledger.payments(), predicate, workers)
    }

    /// Streams chunk sums of a snapshot of the payment log, running at most
    /// `config.workers` chunks at a time.
    ///
    /// Payments added after the call are not included.
    pub fn sum_payments_with_progress(&self) -> Receiver<progress::Progress> {
        let amounts = self.ledger.payments().iter().map(|p| p.amount).collect();
        progress::sum_with_progress(
            amounts,
            self.config.progress_chunk_size,
            self.config.workers,
        )
    }

    /// Writes the ledger as dump files into `dir`, creating it if needed.
    pub fn export(&self, dir: impl AsRef<Path>) -> Result<(), WalletError> {
        dump::save(&self.ledger, dir.as_ref())
    }

    /// Merges dump files from `dir`; records whose id is already known are skipped.
    pub fn import(&mut self, dir: impl AsRef<Path>) -> Result<(), WalletError> {
        dump::load(&mut self.ledger, dir.as_ref())
    }

    /// Writes all accounts into a single `|`-terminated file.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<(), WalletError> {
        dump::save_accounts_file(&self.ledger, path.as_ref())
    }

    /// Merges accounts written by [`Service::export_to_file`].
    pub fn import_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), WalletError> {
        dump::load_accounts_file(&mut self.ledger, path.as_ref())
    }

    /// Copies of the account's payments in insertion order.
    pub fn export_account_history(&self, account_id: i64) -> Result<Vec<Payment>, WalletError> {
        self.find_account_by_id(account_id)?;
        Ok(self
            .ledger
            .payments()
            .iter()
            .filter(|p| p.account_id == account_id)
            .cloned()
            .collect())
    }

    /// Splits `payments` into numbered dump files of `records_per_file` rows.
    pub fn history_to_files(
        &self,
        payments: &[Payment],
        dir: impl AsRef<Path>,
        records_per_file: usize,
    ) -> Result<(), WalletError> {
        history::history_to_files(payments, dir.as_ref(), records_per_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::id::SequentialIds, domain::payment::PaymentStatus};

    fn service() -> Service {
        Service::new().with_id_generator(SequentialIds::new("id"))
    }

    #[test]
    fn find_operations_report_missing_entities() {
        let svc = service();
        assert!(matches!(
            svc.find_account_by_id(1),
            Err(WalletError::AccountNotFound(1))
        ));
        assert!(matches!(
            svc.find_payment_by_id("x"),
            Err(WalletError::PaymentNotFound(_))
        ));
        assert!(matches!(
            svc.find_favorite_by_id("x"),
            Err(WalletError::FavoriteNotFound(_))
        ));
    }

    #[test]
    fn favorite_round_trip_through_service() {
        let mut svc = service();
        let acc = svc.register_account("+992000000001").unwrap();
        svc.deposit(acc.id, Money::new(10_000)).unwrap();
        let payment = svc.pay(acc.id, Money::new(1_000), "auto").unwrap();

        let fav = svc.favorite_payment(&payment.id, "car wash").unwrap();
        let again = svc.pay_from_favorite(&fav.id).unwrap();

        assert_eq!(svc.find_favorite_by_id(&fav.id).unwrap(), &fav);
        assert_eq!(again.amount, payment.amount);
        assert_eq!(again.status, PaymentStatus::InProgress);
        assert_eq!(svc.find_account_by_id(acc.id).unwrap().balance, Money::new(8_000));
    }

    #[test]
    fn filter_payments_requires_known_account() {
        let svc = service();
        assert!(matches!(
            svc.filter_payments(5, 2),
            Err(WalletError::AccountNotFound(5))
        ));
    }

    #[test]
    fn history_is_in_insertion_order() {
        let mut svc = service();
        let a = svc.register_account("+992000000001").unwrap();
        let b = svc.register_account("+992000000002").unwrap();
        svc.deposit(a.id, Money::new(100)).unwrap();
        svc.deposit(b.id, Money::new(100)).unwrap();
        let p1 = svc.pay(a.id, Money::new(1), "x").unwrap();
        svc.pay(b.id, Money::new(2), "y").unwrap();
        let p3 = svc.pay(a.id, Money::new(3), "z").unwrap();

        let history = svc.export_account_history(a.id).unwrap();

        assert_eq!(history, vec![p1, p3]);
        assert!(svc.export_account_history(99).is_err());
    }

    #[test]
    fn progress_stream_uses_configured_chunk_size() {
        let cfg = WalletConfig::default().with_progress_chunk_size(4);
        let mut svc = Service::with_config(cfg).with_id_generator(SequentialIds::new("p"));
        let acc = svc.register_account("+992000000001").unwrap();
        svc.deposit(acc.id, Money::new(1_000)).unwrap();
        for _ in 0..10 {
            svc.pay(acc.id, Money::new(10), "mobile").unwrap();
        }

        let records: Vec<_> = svc.sum_payments_with_progress().iter().collect();

        assert_eq!(records.len(), 3);
        let total: Money = records.iter().map(|r| r.result).sum();
        assert_eq!(total, svc.sum_payments(1));
    }
}
