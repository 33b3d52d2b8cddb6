use std::collections::HashMap;
use std::io::Write;
use serde::Serialize;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct CommissionRecord<'a> {
    account: &'a str,
    commission: String,
}

/// Writes the commissions as CSV, sorted by account id, two decimals per figure.
pub fn write_commissions<W: Write>(commissions: &HashMap<String, f64>, writer: W) -> Result<()> {
    let mut entries: Vec<_> = commissions.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(["account", "commission"])?;
    for (account, commission) in entries {
        csv_writer.serialize(CommissionRecord {
            account: account.as_str(),
            commission: format!("{:.2}", commission),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(commissions: &HashMap<String, f64>) -> String {
        let mut output = Vec::new();
        write_commissions(commissions, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_write_commissions_sorted_with_two_decimals() {
        let commissions = HashMap::from([
            ("2".to_string(), 0.0),
            ("10".to_string(), 12.346),
            ("1".to_string(), 30.000000000000004),
        ]);

        assert_eq!(render(&commissions), "account,commission\n1,30.00\n10,12.35\n2,0.00\n");
    }

    #[test]
    fn test_write_commissions_empty_still_has_header() {
        assert_eq!(render(&HashMap::new()), "account,commission\n");
    }
}
