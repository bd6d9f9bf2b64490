// 💾 Ledger Store - file-backed persistence for the loan ledger
// Format: two lines per loan (ISBN, then Unix-epoch seconds)

use crate::catalog::{truncate_chars, CatalogIndex, MAX_ISBN_LEN};
use crate::ledger::{LoanLedger, LoanRecord, MAX_LOANS};
use anyhow::{Context, Result};
use chrono::DateTime;
use std::fs;
use std::path::Path;

/// Title substituted when a persisted loan's ISBN is no longer in the
/// catalog. Catalog and ledger may legitimately diverge, e.g. after the
/// catalog is reloaded with fewer entries.
pub const UNKNOWN_TITLE: &str = "Unknown title";

/// Load the ledger from its file, resolving titles through the catalog.
///
/// An absent file is not an error: it means no active loans yet. A
/// truncated trailing record is discarded. Reading stops at the ledger's
/// capacity bound. The result fully replaces any in-memory ledger state.
pub fn load_ledger(path: &Path, catalog: &CatalogIndex) -> Result<LoanLedger> {
    if !path.exists() {
        return Ok(LoanLedger::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read ledger file: {}", path.display()))?;

    Ok(parse_ledger(&content, catalog))
}

fn parse_ledger(content: &str, catalog: &CatalogIndex) -> LoanLedger {
    let mut records = Vec::new();
    let mut lines = content.lines();

    while records.len() < MAX_LOANS {
        let Some(isbn_line) = lines.next() else { break };
        let isbn = truncate_chars(isbn_line.trim(), MAX_ISBN_LEN);
        if isbn.is_empty() {
            continue;
        }

        // An ISBN with no parseable timestamp is a truncated record
        let Some(timestamp_line) = lines.next() else { break };
        let Ok(seconds) = timestamp_line.trim().parse::<i64>() else {
            break;
        };
        let Some(borrowed_at) = DateTime::from_timestamp(seconds, 0) else {
            break;
        };

        let title = catalog
            .find_exact(&isbn)
            .map(|entry| entry.title.clone())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

        records.push(LoanRecord {
            isbn,
            title,
            borrowed_at,
        });
    }

    LoanLedger::with_records(records)
}

/// Write every active loan to the ledger file, fully overwriting the
/// prior contents. Each save rewrites the complete ledger from memory,
/// so a failed or missed save never corrupts earlier state.
pub fn save_ledger(path: &Path, ledger: &LoanLedger) -> Result<()> {
    let mut out = String::new();
    for record in ledger.records() {
        out.push_str(&record.isbn);
        out.push('\n');
        out.push_str(&record.borrowed_at.timestamp().to_string());
        out.push('\n');
    }

    fs::write(path, out)
        .with_context(|| format!("failed to write ledger file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("bibliotheca_{}_{}", std::process::id(), name))
    }

    fn sample_catalog() -> CatalogIndex {
        let mut catalog = CatalogIndex::new();
        catalog.insert("9780131103627", "The C Programming Language");
        catalog.insert("9780132350884", "Clean Code");
        catalog
    }

    #[test]
    fn test_missing_file_means_empty_ledger() {
        let catalog = sample_catalog();
        let ledger = load_ledger(Path::new("no_such_ledger.txt"), &catalog).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_path("round_trip.txt");
        let catalog = sample_catalog();

        let mut ledger = LoanLedger::new();
        let t1 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let t2 = DateTime::from_timestamp(1_700_086_400, 0).unwrap();
        ledger.add("9780131103627", "The C Programming Language", t1).unwrap();
        ledger.add("9780132350884", "Clean Code", t2).unwrap();

        save_ledger(&path, &ledger).unwrap();
        let loaded = load_ledger(&path, &catalog).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        let pairs: Vec<(String, i64)> = loaded
            .records()
            .iter()
            .map(|r| (r.isbn.clone(), r.borrowed_at.timestamp()))
            .collect();
        assert!(pairs.contains(&("9780131103627".to_string(), 1_700_000_000)));
        assert!(pairs.contains(&("9780132350884".to_string(), 1_700_086_400)));

        // Titles are re-resolved through the catalog on load
        assert_eq!(loaded.records()[0].title, "The C Programming Language");
    }

    #[test]
    fn test_unknown_isbn_gets_sentinel_title() {
        let catalog = sample_catalog();
        let ledger = parse_ledger("9999999999999\n1700000000\n", &catalog);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].title, UNKNOWN_TITLE);
    }

    #[test]
    fn test_trailing_partial_record_is_discarded() {
        let catalog = sample_catalog();

        let ledger = parse_ledger("9780131103627\n1700000000\n9780132350884\n", &catalog);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].isbn, "9780131103627");

        let ledger = parse_ledger("9780131103627\nnot-a-timestamp\n", &catalog);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_load_stops_at_capacity() {
        let catalog = sample_catalog();

        let mut content = String::new();
        for i in 0..MAX_LOANS + 5 {
            content.push_str(&format!("{:013}\n1700000000\n", i));
        }

        let ledger = parse_ledger(&content, &catalog);
        assert_eq!(ledger.len(), MAX_LOANS);
    }

    #[test]
    fn test_isbn_line_is_trimmed_and_truncated() {
        let catalog = sample_catalog();
        let ledger = parse_ledger("  97801311036271234  \n1700000000\n", &catalog);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].isbn, "9780131103627");
        assert_eq!(ledger.records()[0].title, "The C Programming Language");
    }

    #[test]
    fn test_save_overwrites_prior_file() {
        let path = temp_path("overwrite.txt");
        let catalog = sample_catalog();
        let t = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let mut ledger = LoanLedger::new();
        ledger.add("9780131103627", "The C Programming Language", t).unwrap();
        ledger.add("9780132350884", "Clean Code", t).unwrap();
        save_ledger(&path, &ledger).unwrap();

        ledger.remove("9780131103627").unwrap();
        save_ledger(&path, &ledger).unwrap();

        let loaded = load_ledger(&path, &catalog).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.records()[0].isbn, "9780132350884");
    }

    #[test]
    fn test_empty_file_means_empty_ledger() {
        let catalog = sample_catalog();
        assert!(parse_ledger("", &catalog).is_empty());
        assert!(parse_ledger("\n\n", &catalog).is_empty());
    }
}
