use std::path::PathBuf;

use crate::domain::payment::PaymentStatus;

/// Errors returned by wallet operations and the dump codec.
#[derive(thiserror::Error, Debug)]
pub enum WalletError {
    #[error("phone must not be empty")]
    EmptyPhone,
    #[error("phone already registered: {0}")]
    PhoneRegistered(String),
    #[error("amount must be greater than zero")]
    AmountNonPositive,
    #[error("account not found: {0}")]
    AccountNotFound(i64),
    #[error("payment not found: {0}")]
    PaymentNotFound(String),
    #[error("favorite not found: {0}")]
    FavoriteNotFound(String),
    #[error("not enough balance on account {0}")]
    InsufficientBalance(i64),
    #[error("payment already rejected: {0}")]
    AlreadyRejected(String),
    #[error("payment {id} is {status} and cannot be rejected")]
    PaymentCompleted { id: String, status: PaymentStatus },
    #[error("balance overflow on account {0}")]
    BalanceOverflow(i64),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error in {file} at line {line}: {reason}")]
    Parse {
        file: PathBuf,
        line: u64,
        reason: String,
    },
}

impl WalletError {
    /// Splits a codec error into the IO and parse halves of the taxonomy.
    pub(crate) fn from_csv(file: &std::path::Path, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => WalletError::Io(io),
            _ => WalletError::Parse {
                file: file.to_path_buf(),
                line,
                reason,
            },
        }
    }
}

/// Errors surfaced by the `wallet` binary.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(
        "usage: wallet summary <dump-dir> [workers] | wallet history <dump-dir> <account-id> <out-dir> <records-per-file>"
    )]
    Usage,
    #[error("invalid argument {name}: {value}")]
    InvalidArg { name: &'static str, value: String },
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
