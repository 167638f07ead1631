use crate::{
    common::{error::WalletError, money::Money},
    domain::{account::Account, ledger::Ledger},
};

pub fn handle(ledger: &mut Ledger, account_id: i64, amount: Money) -> Result<(), WalletError> {
    if !amount.is_positive() {
        return Err(WalletError::AmountNonPositive);
    }

    let acc = ledger
        .account_mut(account_id)
        .ok_or(WalletError::AccountNotFound(account_id))?;

    apply_deposit(acc, amount)?;
    tracing::debug!(account_id, %amount, balance = %acc.balance, "deposit applied");
    Ok(())
}

fn apply_deposit(acc: &mut Account, amount: Money) -> Result<(), WalletError> {
    acc.balance = acc
        .balance
        .checked_add(amount)
        .ok_or(WalletError::BalanceOverflow(acc.id))?;
    Ok(())
}
