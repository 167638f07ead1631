use std::io::Write;

use crate::domain::{account::Account, favorite::Favorite, payment::Payment};

#[derive(serde::Serialize)]
struct AccountRow<'a> {
    id: i64,
    phone: &'a str,
    balance: i64,
}

#[derive(serde::Serialize)]
struct PaymentRow<'a> {
    id: &'a str,
    account_id: i64,
    amount: i64,
    category: &'a str,
    status: &'static str,
}

#[derive(serde::Serialize)]
struct FavoriteRow<'a> {
    id: &'a str,
    account_id: i64,
    name: &'a str,
    amount: i64,
    category: &'a str,
}

/// Human-facing account listing, with a header row.
#[derive(serde::Serialize)]
struct SummaryRow<'a> {
    id: i64,
    phone: &'a str,
    balance: String,
}

/// Builds a writer for `;`-separated records without a header row.
///
/// Fields holding `;`, quotes or line breaks are quoted.
pub fn dump_writer<W: Write>(writer: W, terminator: csv::Terminator) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .terminator(terminator)
        .from_writer(writer)
}

fn newline_writer<W: Write>(writer: W) -> csv::Writer<W> {
    dump_writer(writer, csv::Terminator::Any(b'\n'))
}

/// Writes `<id>;<phone>;<balance>` lines.
pub fn write_accounts<W: Write>(writer: W, accounts: &[Account]) -> Result<(), csv::Error> {
    write_accounts_to(newline_writer(writer), accounts)
}

/// Writes accounts into an already configured dump writer.
pub fn write_accounts_to<W: Write>(
    mut wtr: csv::Writer<W>,
    accounts: &[Account],
) -> Result<(), csv::Error> {
    for acc in accounts {
        wtr.serialize(AccountRow {
            id: acc.id,
            phone: &acc.phone,
            balance: acc.balance.as_i64(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `<id>;<accountId>;<amount>;<category>;<status>` lines.
///
/// # Examples
///
/// ```
/// use wallet::common::money::Money;
/// use wallet::domain::payment::Payment;
/// use wallet::io::writer::write_payments;
///
/// let payments = vec![Payment::new("p-1", 1, Money::new(1000), "auto")];
/// let mut out = Vec::new();
/// write_payments(&mut out, &payments).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "p-1;1;1000;auto;INPROGRESS\n");
/// ```
pub fn write_payments<W: Write>(writer: W, payments: &[Payment]) -> Result<(), csv::Error> {
    let mut wtr = newline_writer(writer);
    for p in payments {
        wtr.serialize(PaymentRow {
            id: &p.id,
            account_id: p.account_id,
            amount: p.amount.as_i64(),
            category: &p.category,
            status: p.status.as_str(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `<id>;<accountId>;<name>;<amount>;<category>` lines.
pub fn write_favorites<W: Write>(writer: W, favorites: &[Favorite]) -> Result<(), csv::Error> {
    let mut wtr = newline_writer(writer);
    for f in favorites {
        wtr.serialize(FavoriteRow {
            id: &f.id,
            account_id: f.account_id,
            name: &f.name,
            amount: f.amount.as_i64(),
            category: &f.category,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes an `id,phone,balance` CSV with a header, balances in major units.
pub fn write_summary<W: Write>(writer: W, accounts: &[Account]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for acc in accounts {
        wtr.serialize(SummaryRow {
            id: acc.id,
            phone: &acc.phone,
            balance: acc.balance.to_string_2dp(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
