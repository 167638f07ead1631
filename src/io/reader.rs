use std::{io::Read, path::Path};

use serde::de::DeserializeOwned;

use crate::{
    common::{error::WalletError, money::Money},
    domain::{account::Account, favorite::Favorite, payment::Payment},
};

/// Internal row layouts, positional, matching the dump formats.
#[derive(serde::Deserialize)]
struct AccountRow {
    id: i64,
    phone: String,
    balance: i64,
}

#[derive(serde::Deserialize)]
struct PaymentRow {
    id: String,
    account_id: i64,
    amount: i64,
    category: String,
    status: String,
}

#[derive(serde::Deserialize)]
struct FavoriteRow {
    id: String,
    account_id: i64,
    name: String,
    amount: i64,
    category: String,
}

/// Builds a reader for `;`-separated records without a header row.
///
/// Blank lines and a trailing terminator are tolerated.
pub fn dump_reader<R: Read>(rdr: R, terminator: csv::Terminator) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .terminator(terminator)
        .flexible(true)
        .from_reader(rdr)
}

/// Reads `<id>;<phone>;<balance>` rows.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use wallet::io::reader::{dump_reader, read_accounts};
///
/// let data = "1;+992000000001;10000\n2;+992000000002;0\n";
/// let mut rdr = dump_reader(data.as_bytes(), csv::Terminator::Any(b'\n'));
/// let accounts: Vec<_> = read_accounts(&mut rdr, Path::new("accounts.dump"))
///     .map(|r| r.unwrap().1)
///     .collect();
///
/// assert_eq!(accounts[0].phone, "+992000000001");
/// assert_eq!(accounts[1].id, 2);
/// ```
pub fn read_accounts<'r, R: Read>(
    rdr: &'r mut csv::Reader<R>,
    path: &'r Path,
) -> impl Iterator<Item = Result<(u64, Account), WalletError>> + 'r {
    rows::<R, AccountRow>(rdr, path).map(|res| -> Result<(u64, Account), WalletError> {
        let (line, row) = res?;
        Ok((
            line,
            Account {
                id: row.id,
                phone: row.phone,
                balance: Money::new(row.balance),
            },
        ))
    })
}

/// Reads `<id>;<accountId>;<amount>;<category>;<status>` rows.
pub fn read_payments<'r, R: Read>(
    rdr: &'r mut csv::Reader<R>,
    path: &'r Path,
) -> impl Iterator<Item = Result<(u64, Payment), WalletError>> + 'r {
    rows::<R, PaymentRow>(rdr, path).map(move |res| -> Result<(u64, Payment), WalletError> {
        let (line, row) = res?;
        let status = row.status.parse().map_err(|reason| WalletError::Parse {
            file: path.to_path_buf(),
            line,
            reason,
        })?;
        Ok((
            line,
            Payment {
                id: row.id,
                account_id: row.account_id,
                amount: Money::new(row.amount),
                category: row.category,
                status,
            },
        ))
    })
}

/// Reads `<id>;<accountId>;<name>;<amount>;<category>` rows.
pub fn read_favorites<'r, R: Read>(
    rdr: &'r mut csv::Reader<R>,
    path: &'r Path,
) -> impl Iterator<Item = Result<(u64, Favorite), WalletError>> + 'r {
    rows::<R, FavoriteRow>(rdr, path).map(|res| -> Result<(u64, Favorite), WalletError> {
        let (line, row) = res?;
        Ok((
            line,
            Favorite {
                id: row.id,
                account_id: row.account_id,
                name: row.name,
                amount: Money::new(row.amount),
                category: row.category,
            },
        ))
    })
}

// Deserializes each record positionally and keeps its line for error context.
fn rows<'r, R: Read, T: DeserializeOwned>(
    rdr: &'r mut csv::Reader<R>,
    path: &'r Path,
) -> impl Iterator<Item = Result<(u64, T), WalletError>> + 'r {
    rdr.records().map(move |res| -> Result<(u64, T), WalletError> {
        let record = res.map_err(|e| WalletError::from_csv(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row = record
            .deserialize::<T>(None)
            .map_err(|e| WalletError::from_csv(path, e))?;
        Ok((line, row))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentStatus;

    fn newline_reader(input: &str) -> csv::Reader<&[u8]> {
        dump_reader(input.as_bytes(), csv::Terminator::Any(b'\n'))
    }

    #[test]
    fn parses_payments_with_every_status() {
        let data = "a;1;100;auto;INPROGRESS\nb;1;200;food;FAIL\nc;2;300;mobile;OK";
        let mut rdr = newline_reader(data);
        let payments: Vec<Payment> = read_payments(&mut rdr, Path::new("payments.dump"))
            .map(|r| r.unwrap().1)
            .collect();

        assert_eq!(payments.len(), 3);
        assert_eq!(payments[0].status, PaymentStatus::InProgress);
        assert_eq!(payments[1].status, PaymentStatus::Fail);
        assert_eq!(payments[2].status, PaymentStatus::Ok);
        assert_eq!(payments[2].amount, Money::new(300));
        assert_eq!(payments[2].category, "mobile");
    }

    #[test]
    fn parses_favorites_in_field_order() {
        let data = "f-1;3;rent;45000;home\n";
        let mut rdr = newline_reader(data);
        let fav = read_favorites(&mut rdr, Path::new("favorites.dump"))
            .next()
            .unwrap()
            .unwrap()
            .1;

        assert_eq!(fav.id, "f-1");
        assert_eq!(fav.account_id, 3);
        assert_eq!(fav.name, "rent");
        assert_eq!(fav.amount, Money::new(45000));
        assert_eq!(fav.category, "home");
    }

    #[test]
    fn reports_unknown_status_with_line() {
        let data = "a;1;100;auto;OK\nb;1;100;auto;DONE\n";
        let mut rdr = newline_reader(data);
        let results: Vec<_> = read_payments(&mut rdr, Path::new("payments.dump")).collect();

        assert!(results[0].is_ok());
        match &results[1] {
            Err(WalletError::Parse { line, reason, .. }) => {
                assert_eq!(*line, 2);
                assert_eq!(reason, "unknown payment status: DONE");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn reports_malformed_number() {
        let data = "x;+992000000001;10\n";
        let mut rdr = newline_reader(data);
        let err = read_accounts(&mut rdr, Path::new("accounts.dump"))
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, WalletError::Parse { .. }));
    }

    #[test]
    fn pipe_terminated_accounts() {
        let data = "1;+992000000001;500|2;+992000000002;0|";
        let mut rdr = dump_reader(data.as_bytes(), csv::Terminator::Any(b'|'));
        let ids: Vec<i64> = read_accounts(&mut rdr, Path::new("accounts"))
            .map(|r| r.unwrap().1.id)
            .collect();
        assert_eq!(ids, [1, 2]);
    }
}
