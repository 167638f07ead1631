//! In-memory wallet: accounts, payments and favorite templates, with
//! parallel aggregation over the payment log and plain-text dumps.

pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod service;
pub mod worker;

pub use common::{error::WalletError, money::Money};
pub use service::Service;
