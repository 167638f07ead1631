use crate::{
    common::{error::WalletError, id::IdGenerator},
    domain::{favorite::Favorite, ledger::Ledger},
    service::handlers::pay::unused_id,
};

/// Saves an existing payment as a named template.
pub fn handle(
    ledger: &mut Ledger,
    ids: &mut dyn IdGenerator,
    payment_id: &str,
    name: &str,
) -> Result<Favorite, WalletError> {
    let payment = ledger
        .payment(payment_id)
        .ok_or_else(|| WalletError::PaymentNotFound(payment_id.to_string()))?;
    let id = unused_id(ids, |id| ledger.favorite(id).is_some());

    let favorite = Favorite {
        id,
        account_id: payment.account_id,
        name: name.to_string(),
        amount: payment.amount,
        category: payment.category.clone(),
    };
    ledger.insert_favorite(favorite.clone());
    tracing::debug!(favorite_id = %favorite.id, payment_id, name, "favorite created");

    Ok(favorite)
}
