use crate::{
    common::{error::WalletError, money::Money},
    domain::{account::Account, ledger::Ledger, payment::PaymentStatus},
};

/// Marks an in-progress payment as failed and refunds its amount.
///
/// A payment is refunded at most once: rejecting a `FAIL` payment returns
/// `AlreadyRejected`, rejecting an `OK` one returns `PaymentCompleted`.
pub fn handle(ledger: &mut Ledger, payment_id: &str) -> Result<(), WalletError> {
    let (account_id, amount, status) = match ledger.payment(payment_id) {
        Some(p) => (p.account_id, p.amount, p.status),
        None => return Err(WalletError::PaymentNotFound(payment_id.to_string())),
    };

    match status {
        PaymentStatus::InProgress => {}
        PaymentStatus::Fail => {
            tracing::debug!(payment_id, "reject refused: already rejected");
            return Err(WalletError::AlreadyRejected(payment_id.to_string()));
        }
        PaymentStatus::Ok => {
            return Err(WalletError::PaymentCompleted {
                id: payment_id.to_string(),
                status,
            });
        }
    }

    // resolve the account before touching the payment so a dangling
    // reference leaves both untouched
    let acc = ledger
        .account_mut(account_id)
        .ok_or(WalletError::AccountNotFound(account_id))?;
    apply_refund(acc, amount)?;

    if let Some(p) = ledger.payment_mut(payment_id) {
        p.set_status(PaymentStatus::Fail);
    }
    tracing::debug!(payment_id, account_id, %amount, "payment rejected");

    Ok(())
}

fn apply_refund(acc: &mut Account, amount: Money) -> Result<(), WalletError> {
    acc.balance = acc
        .balance
        .checked_add(amount)
        .ok_or(WalletError::BalanceOverflow(acc.id))?;
    Ok(())
}
