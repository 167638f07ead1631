use crate::{
    common::{error::WalletError, id::IdGenerator, money::Money},
    domain::{account::Account, ledger::Ledger, payment::Payment},
};

/// Debits the account and records an in-progress payment.
///
/// Every payment-creating operation (repeat, pay from favorite) goes through
/// here so the amount and balance checks run against current state.
pub fn handle(
    ledger: &mut Ledger,
    ids: &mut dyn IdGenerator,
    account_id: i64,
    amount: Money,
    category: &str,
) -> Result<Payment, WalletError> {
    if !amount.is_positive() {
        return Err(WalletError::AmountNonPositive);
    }

    let acc = ledger
        .account_mut(account_id)
        .ok_or(WalletError::AccountNotFound(account_id))?;

    if !acc.can_afford(amount) {
        tracing::debug!(account_id, %amount, balance = %acc.balance, "payment refused: not enough balance");
        return Err(WalletError::InsufficientBalance(account_id));
    }

    apply_payment(acc, amount);
    let id = unused_id(ids, |id| ledger.payment(id).is_some());

    let payment = Payment::new(id, account_id, amount, category);
    ledger.insert_payment(payment.clone());
    tracing::debug!(payment_id = %payment.id, account_id, %amount, category, "payment created");

    Ok(payment)
}

/// Draws ids until one is free; imported dumps may already hold generated ids.
pub(crate) fn unused_id(ids: &mut dyn IdGenerator, taken: impl Fn(&str) -> bool) -> String {
    let mut id = ids.next_id();
    while taken(&id) {
        id = ids.next_id();
    }
    id
}

fn apply_payment(acc: &mut Account, amount: Money) {
    acc.balance -= amount;
}
