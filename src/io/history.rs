use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path,
};

use crate::{common::error::WalletError, domain::payment::Payment, io::writer};

/// Writes `payments` into `dir` in the payments dump format.
///
/// Up to `records_per_file` payments go into a single `payments.dump`;
/// more are split into `payments1.dump`, `payments2.dump`, ... in order,
/// the last file holding the remainder. A zero limit counts as one.
/// Empty input writes nothing.
pub fn history_to_files(
    payments: &[Payment],
    dir: &Path,
    records_per_file: usize,
) -> Result<(), WalletError> {
    if payments.is_empty() {
        return Ok(());
    }
    let records_per_file = records_per_file.max(1);
    fs::create_dir_all(dir)?;

    let files = if payments.len() <= records_per_file {
        write_chunk(&dir.join("payments.dump"), payments)?;
        1
    } else {
        let mut files = 0;
        for (i, chunk) in payments.chunks(records_per_file).enumerate() {
            write_chunk(&dir.join(format!("payments{}.dump", i + 1)), chunk)?;
            files += 1;
        }
        files
    };
    tracing::info!(dir = %dir.display(), payments = payments.len(), files, "history exported");
    Ok(())
}

fn write_chunk(path: &Path, payments: &[Payment]) -> Result<(), WalletError> {
    let file = BufWriter::new(File::create(path)?);
    writer::write_payments(file, payments).map_err(|e| WalletError::from_csv(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::money::Money;

    fn payments(n: usize) -> Vec<Payment> {
        (1..=n)
            .map(|i| Payment::new(format!("p-{i}"), 1, Money::new(100), "mobile"))
            .collect()
    }

    fn line_count(path: &Path) -> usize {
        fs::read_to_string(path).unwrap().lines().count()
    }

    #[test]
    fn small_history_goes_into_one_file() {
        let dir = tempfile::tempdir().unwrap();
        history_to_files(&payments(9), dir.path(), 9).unwrap();

        assert_eq!(line_count(&dir.path().join("payments.dump")), 9);
        assert!(!dir.path().join("payments1.dump").exists());
    }

    #[test]
    fn large_history_is_split_with_remainder_last() {
        let dir = tempfile::tempdir().unwrap();
        history_to_files(&payments(7), dir.path(), 3).unwrap();

        assert_eq!(line_count(&dir.path().join("payments1.dump")), 3);
        assert_eq!(line_count(&dir.path().join("payments2.dump")), 3);
        assert_eq!(line_count(&dir.path().join("payments3.dump")), 1);
        assert!(!dir.path().join("payments4.dump").exists());
        assert!(!dir.path().join("payments.dump").exists());

        let last = fs::read_to_string(dir.path().join("payments3.dump")).unwrap();
        assert_eq!(last, "p-7;1;100;mobile;INPROGRESS\n");
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        let dir = tempfile::tempdir().unwrap();
        history_to_files(&payments(4), dir.path(), 2).unwrap();

        assert_eq!(line_count(&dir.path().join("payments2.dump")), 2);
        assert!(!dir.path().join("payments3.dump").exists());
    }

    #[test]
    fn empty_history_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        history_to_files(&[], &target, 5).unwrap();
        assert!(!target.exists());
    }
}
