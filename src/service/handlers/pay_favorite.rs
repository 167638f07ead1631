use crate::{
    common::{error::WalletError, id::IdGenerator},
    domain::{ledger::Ledger, payment::Payment},
    service::handlers::pay,
};

pub fn handle(
    ledger: &mut Ledger,
    ids: &mut dyn IdGenerator,
    favorite_id: &str,
) -> Result<Payment, WalletError> {
    let (account_id, amount, category) = match ledger.favorite(favorite_id) {
        Some(f) => (f.account_id, f.amount, f.category.clone()),
        None => return Err(WalletError::FavoriteNotFound(favorite_id.to_string())),
    };

    pay::handle(ledger, ids, account_id, amount, &category)
}
