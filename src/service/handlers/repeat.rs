use crate::{
    common::{error::WalletError, id::IdGenerator},
    domain::{ledger::Ledger, payment::Payment},
    service::handlers::pay,
};

/// Issues a fresh payment with the original's account, amount and category.
pub fn handle(
    ledger: &mut Ledger,
    ids: &mut dyn IdGenerator,
    payment_id: &str,
) -> Result<Payment, WalletError> {
    let (account_id, amount, category) = match ledger.payment(payment_id) {
        Some(p) => (p.account_id, p.amount, p.category.clone()),
        None => return Err(WalletError::PaymentNotFound(payment_id.to_string())),
    };

    let repeated = pay::handle(ledger, ids, account_id, amount, &category)?;
    tracing::debug!(payment_id, repeated_id = %repeated.id, "payment repeated");
    Ok(repeated)
}
