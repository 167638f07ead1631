pub mod account;
pub mod favorite;
pub mod ledger;
pub mod payment;
