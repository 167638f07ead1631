//! Ledger persistence as a directory of `.dump` files.
//!
//! `save` writes one file per non-empty collection; `load` merges files back
//! by id, treating a missing file as an empty collection.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter},
    path::Path,
};

use crate::{
    common::{error::WalletError, money::Money},
    domain::{account::Account, ledger::Ledger},
    io::{reader, writer},
};

pub const ACCOUNTS_FILE: &str = "accounts.dump";
pub const PAYMENTS_FILE: &str = "payments.dump";
pub const FAVORITES_FILE: &str = "favorites.dump";

pub fn save(ledger: &Ledger, dir: &Path) -> Result<(), WalletError> {
    fs::create_dir_all(dir)?;

    if !ledger.accounts().is_empty() {
        let path = dir.join(ACCOUNTS_FILE);
        let file = BufWriter::new(File::create(&path)?);
        writer::write_accounts(file, ledger.accounts())
            .map_err(|e| WalletError::from_csv(&path, e))?;
    }

    if !ledger.payments().is_empty() {
        let path = dir.join(PAYMENTS_FILE);
        let file = BufWriter::new(File::create(&path)?);
        writer::write_payments(file, ledger.payments())
            .map_err(|e| WalletError::from_csv(&path, e))?;
    }

    if !ledger.favorites().is_empty() {
        let path = dir.join(FAVORITES_FILE);
        let file = BufWriter::new(File::create(&path)?);
        writer::write_favorites(file, ledger.favorites())
            .map_err(|e| WalletError::from_csv(&path, e))?;
    }

    tracing::info!(
        dir = %dir.display(),
        accounts = ledger.accounts().len(),
        payments = ledger.payments().len(),
        favorites = ledger.favorites().len(),
        "ledger exported"
    );
    Ok(())
}

/// Merges dump files into `ledger`.
///
/// Files are read accounts first, then payments, then favorites. The first
/// error stops the import; records merged before it are kept. New accounts
/// need a non-negative balance and an unused phone. Payments and favorites
/// need a positive amount and an account present in the ledger by then.
pub fn load(ledger: &mut Ledger, dir: &Path) -> Result<(), WalletError> {
    let mut added = (0usize, 0usize, 0usize);

    let path = dir.join(ACCOUNTS_FILE);
    if let Some(mut rdr) = open_dump(&path, csv::Terminator::Any(b'\n'))? {
        for res in reader::read_accounts(&mut rdr, &path) {
            let (line, account) = res?;
            check_account(ledger, &account).map_err(|reason| invalid(&path, line, reason))?;
            if ledger.insert_account(account) {
                added.0 += 1;
            }
        }
    }

    let path = dir.join(PAYMENTS_FILE);
    if let Some(mut rdr) = open_dump(&path, csv::Terminator::Any(b'\n'))? {
        for res in reader::read_payments(&mut rdr, &path) {
            let (line, payment) = res?;
            check_reference(ledger, payment.account_id, payment.amount)
                .map_err(|reason| invalid(&path, line, reason))?;
            if ledger.insert_payment(payment) {
                added.1 += 1;
            }
        }
    }

    let path = dir.join(FAVORITES_FILE);
    if let Some(mut rdr) = open_dump(&path, csv::Terminator::Any(b'\n'))? {
        for res in reader::read_favorites(&mut rdr, &path) {
            let (line, favorite) = res?;
            check_reference(ledger, favorite.account_id, favorite.amount)
                .map_err(|reason| invalid(&path, line, reason))?;
            if ledger.insert_favorite(favorite) {
                added.2 += 1;
            }
        }
    }

    tracing::info!(
        dir = %dir.display(),
        accounts = added.0,
        payments = added.1,
        favorites = added.2,
        next_account_id = ledger.last_account_id() + 1,
        "ledger imported"
    );
    Ok(())
}

/// Writes every account as a `|`-terminated record into one file.
pub fn save_accounts_file(ledger: &Ledger, path: &Path) -> Result<(), WalletError> {
    let file = BufWriter::new(File::create(path)?);
    let wtr = writer::dump_writer(file, csv::Terminator::Any(b'|'));
    writer::write_accounts_to(wtr, ledger.accounts())
        .map_err(|e| WalletError::from_csv(path, e))?;
    tracing::info!(path = %path.display(), accounts = ledger.accounts().len(), "accounts exported");
    Ok(())
}

/// Merges accounts written by [`save_accounts_file`]; the file must exist.
pub fn load_accounts_file(ledger: &mut Ledger, path: &Path) -> Result<(), WalletError> {
    let file = BufReader::new(File::open(path)?);
    let mut rdr = reader::dump_reader(file, csv::Terminator::Any(b'|'));
    let mut added = 0usize;
    for res in reader::read_accounts(&mut rdr, path) {
        let (line, account) = res?;
        check_account(ledger, &account).map_err(|reason| invalid(path, line, reason))?;
        if ledger.insert_account(account) {
            added += 1;
        }
    }
    tracing::info!(path = %path.display(), accounts = added, "accounts imported");
    Ok(())
}

fn open_dump(
    path: &Path,
    terminator: csv::Terminator,
) -> Result<Option<csv::Reader<BufReader<File>>>, WalletError> {
    match File::open(path) {
        Ok(file) => Ok(Some(reader::dump_reader(BufReader::new(file), terminator))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "dump file missing, treated as empty");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

// A record whose id is already in memory is skipped by the merge, so only
// new accounts are checked against registered phones.
fn check_account(ledger: &Ledger, account: &Account) -> Result<(), String> {
    if account.balance < Money::zero() {
        return Err(format!("negative balance {}", account.balance));
    }
    if ledger.account(account.id).is_none() && ledger.phone_registered(&account.phone) {
        return Err(format!("phone already registered: {}", account.phone));
    }
    Ok(())
}

fn check_reference(ledger: &Ledger, account_id: i64, amount: Money) -> Result<(), String> {
    if !amount.is_positive() {
        return Err(format!("non-positive amount {amount}"));
    }
    if ledger.account(account_id).is_none() {
        return Err(format!("unknown account {account_id}"));
    }
    Ok(())
}

fn invalid(path: &Path, line: u64, reason: String) -> WalletError {
    WalletError::Parse {
        file: path.to_path_buf(),
        line,
        reason,
    }
}
