use std::io::{self, Write};
use log::info;
use rand::Rng;

pub const DEFAULT_ACCOUNTS: u32 = 100;
const MAX_AMOUNT: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedFile {
    pub bytes: u64,
    pub lines: u64,
}

/// Writes random `account,TX<counter>,amount` lines until at least `target_bytes` are written.
///
/// Account ids are drawn from `1..=accounts`, amounts from `[0, 10000)` rounded to cents.
pub fn write_transactions<W: Write, R: Rng>(
    writer: &mut W,
    rng: &mut R,
    target_bytes: u64,
    accounts: u32,
) -> io::Result<GeneratedFile> {
    let accounts = accounts.max(1);
    let progress_step = (target_bytes / 10).max(1);
    let mut next_progress = progress_step;
    let mut generated = GeneratedFile { bytes: 0, lines: 0 };

    while generated.bytes < target_bytes {
        let account_id = rng.gen_range(1..=accounts);
        let amount = (rng.gen_range(0.0..MAX_AMOUNT) * 100.0).round() / 100.0;

        let line = format!("{},TX{:07},{}\n", account_id, generated.lines + 1, amount);
        writer.write_all(line.as_bytes())?;

        generated.bytes += line.len() as u64;
        generated.lines += 1;

        if generated.bytes >= next_progress {
            info!(
                "Generated {} of {} bytes ({} transactions)",
                generated.bytes.min(target_bytes),
                target_bytes,
                generated.lines
            );
            next_progress += progress_step;
        }
    }

    writer.flush()?;
    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::storage::{Storage, TransactionStorage};

    #[test]
    fn test_generated_lines_parse_completely() {
        let mut output = Vec::new();
        let mut rng = StdRng::seed_from_u64(7);

        let generated = write_transactions(&mut output, &mut rng, 64 * 1024, 5).unwrap();

        assert!(generated.bytes >= 64 * 1024);
        assert_eq!(generated.bytes, output.len() as u64);

        let storage = TransactionStorage::from_reader(output.as_slice()).unwrap();
        assert_eq!(storage.transaction_count() as u64, generated.lines);
        assert_eq!(storage.skipped_lines(), 0);
        assert!(storage.aggregates().len() <= 5);
    }

    #[test]
    fn test_generated_transaction_ids_are_sequential() {
        let mut output = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);

        write_transactions(&mut output, &mut rng, 100, DEFAULT_ACCOUNTS).unwrap();

        let text = String::from_utf8(output).unwrap();
        for (index, line) in text.lines().enumerate() {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 3);
            assert_eq!(fields[1], format!("TX{:07}", index + 1));

            let account: u32 = fields[0].parse().unwrap();
            assert!((1..=DEFAULT_ACCOUNTS).contains(&account));

            let amount: f64 = fields[2].parse().unwrap();
            assert!((0.0..=MAX_AMOUNT).contains(&amount));
        }
    }

    #[test]
    fn test_zero_target_writes_nothing() {
        let mut output = Vec::new();
        let mut rng = StdRng::seed_from_u64(3);

        let generated = write_transactions(&mut output, &mut rng, 0, 10).unwrap();

        assert_eq!(generated, GeneratedFile { bytes: 0, lines: 0 });
        assert!(output.is_empty());
    }
}
