use std::io::{stdout, BufWriter, Write};
use std::str::FromStr;

use crate::{
    common::{
        config::{WalletConfig, DEFAULT_WORKERS},
        error::AppError,
        money::Money,
    },
    io::writer,
    service::Service,
};

/// Entry point of the `wallet` binary; command output goes to stdout.
pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let stdout = stdout();
    run_to(args, BufWriter::new(stdout.lock()))
}

/// Same as [`run`] with an explicit output sink.
pub fn run_to<I, S, W>(args: I, out: W) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    W: Write,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 3 {
        return Err(AppError::Usage);
    }

    match args[1].as_str() {
        "summary" => summary(&args[2..], out),
        "history" => history(&args[2..]),
        _ => Err(AppError::Usage),
    }
}

// summary <dump-dir> [workers]
fn summary<W: Write>(args: &[String], out: W) -> Result<(), AppError> {
    let dir = &args[0];
    let workers = match args.get(1) {
        Some(v) => parse_arg("workers", v)?,
        None => DEFAULT_WORKERS,
    };

    let mut service = Service::with_config(WalletConfig::default().with_workers(workers));
    service.import(dir)?;

    let total = service.sum_payments(service.config().workers);
    let streamed: Money = service
        .sum_payments_with_progress()
        .iter()
        .map(|p| p.result)
        .sum();
    tracing::info!(
        payments = service.ledger().payments().len(),
        %total,
        total_major = %total.to_string_2dp(),
        %streamed,
        "payment totals"
    );

    writer::write_summary(out, service.ledger().accounts())?;
    Ok(())
}

// history <dump-dir> <account-id> <out-dir> <records-per-file>
fn history(args: &[String]) -> Result<(), AppError> {
    if args.len() < 4 {
        return Err(AppError::Usage);
    }
    let account_id: i64 = parse_arg("account-id", &args[1])?;
    let records: usize = parse_arg("records-per-file", &args[3])?;

    let mut service = Service::new();
    service.import(&args[0])?;

    let payments = service.export_account_history(account_id)?;
    service.history_to_files(&payments, &args[2], records)?;
    tracing::info!(account_id, payments = payments.len(), out = %args[2], "history written");
    Ok(())
}

fn parse_arg<T: FromStr>(name: &'static str, value: &str) -> Result<T, AppError> {
    value.parse().map_err(|_| AppError::InvalidArg {
        name,
        value: value.to_string(),
    })
}
