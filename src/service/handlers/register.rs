use crate::{
    common::error::WalletError,
    domain::{account::Account, ledger::Ledger},
};

pub fn handle(ledger: &mut Ledger, phone: &str) -> Result<Account, WalletError> {
    if phone.is_empty() {
        return Err(WalletError::EmptyPhone);
    }

    // linear scan over accounts
    if ledger.phone_registered(phone) {
        tracing::debug!(phone, "register refused: phone already registered");
        return Err(WalletError::PhoneRegistered(phone.to_string()));
    }

    let account = Account::new(ledger.next_account_id(), phone);
    ledger.insert_account(account.clone());
    tracing::debug!(account_id = account.id, phone, "account registered");

    Ok(account)
}
