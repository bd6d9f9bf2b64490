// 📖 Loan Ledger - active loans with overdue detection
// Bounded, unordered table; duplicates per ISBN are allowed by design

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of simultaneously active loans
pub const MAX_LOANS: usize = 100;

/// Loan period in days; a loan older than this is overdue
pub const LOAN_PERIOD_DAYS: i64 = 28;

// ============================================================================
// ERROR TAXONOMY
// ============================================================================

/// Everything that can go wrong on the borrow/return path.
///
/// None of these are fatal: the shell reports the message and keeps
/// running its interaction loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Borrow against an ISBN that is not in the catalog
    UnknownBook(String),
    /// Borrow while the ledger already holds `MAX_LOANS` records
    CapacityExceeded(usize),
    /// Return against an ISBN with no active loan
    NotBorrowed(String),
    /// The ledger file could not be written
    SourceUnavailable(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::UnknownBook(isbn) => {
                write!(f, "no book with ISBN '{}' exists in the catalog", isbn)
            }
            LedgerError::CapacityExceeded(max) => {
                write!(f, "the maximum number of loans ({}) has been reached", max)
            }
            LedgerError::NotBorrowed(isbn) => {
                write!(f, "no active loan for ISBN '{}'", isbn)
            }
            LedgerError::SourceUnavailable(detail) => {
                write!(f, "ledger file unavailable: {}", detail)
            }
        }
    }
}

impl std::error::Error for LedgerError {}

// ============================================================================
// LOAN RECORDS
// ============================================================================

/// One active loan.
///
/// The title is a snapshot taken at loan time, so the ledger stays
/// self-describing even if the catalog is later reloaded without this
/// book. Do not replace it with a join against the catalog at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub isbn: String,
    pub title: String,
    pub borrowed_at: DateTime<Utc>,
}

/// One row of the account view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanStatus {
    pub isbn: String,
    pub title: String,
    /// Days left in the loan period; negative means overdue by that many days
    pub remaining_days: i64,
}

/// Bounded table of active loans.
///
/// Storage order is insertion order except where `remove` swaps the last
/// record into the freed slot; no ordering is guaranteed and the account
/// view enumerates records exactly as stored.
pub struct LoanLedger {
    records: Vec<LoanRecord>,
}

impl LoanLedger {
    pub fn new() -> Self {
        LoanLedger {
            records: Vec::new(),
        }
    }

    /// Build a ledger from already-materialized records, truncating to
    /// capacity. Used by the store on load, which fully replaces any
    /// in-memory state.
    pub fn with_records(mut records: Vec<LoanRecord>) -> Self {
        records.truncate(MAX_LOANS);
        LoanLedger { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Active records in storage order
    pub fn records(&self) -> &[LoanRecord] {
        &self.records
    }

    /// Whether any active loan exists for this ISBN
    pub fn contains(&self, isbn: &str) -> bool {
        self.records.iter().any(|r| r.isbn == isbn)
    }

    /// Append a loan.
    ///
    /// A second loan for an ISBN that is already out is appended rather
    /// than rejected: the catalog assumes unlimited copies per title, so
    /// there is no upper bound on duplicate active loans. Fails only when
    /// the ledger is full, in which case it is left unchanged.
    pub fn add(
        &mut self,
        isbn: &str,
        title: &str,
        borrowed_at: DateTime<Utc>,
    ) -> Result<LoanRecord, LedgerError> {
        if self.records.len() >= MAX_LOANS {
            return Err(LedgerError::CapacityExceeded(MAX_LOANS));
        }

        let record = LoanRecord {
            isbn: isbn.to_string(),
            title: title.to_string(),
            borrowed_at,
        };
        self.records.push(record.clone());
        Ok(record)
    }

    /// Remove exactly one loan for this ISBN and return it.
    ///
    /// Removal is swap-with-last-then-shrink, so the size drops by exactly
    /// one and every surviving record keeps its own ISBN/title/timestamp
    /// pairing; only slot positions change.
    pub fn remove(&mut self, isbn: &str) -> Result<LoanRecord, LedgerError> {
        let index = self
            .records
            .iter()
            .position(|r| r.isbn == isbn)
            .ok_or_else(|| LedgerError::NotBorrowed(isbn.to_string()))?;

        Ok(self.records.swap_remove(index))
    }

    /// Account rows for every active loan, in storage order.
    ///
    /// `remaining_days` is the loan period minus whole elapsed days;
    /// a fresh loan therefore shows the full period.
    pub fn list_active(&self, now: DateTime<Utc>) -> Vec<LoanStatus> {
        self.records
            .iter()
            .map(|r| LoanStatus {
                isbn: r.isbn.clone(),
                title: r.title.clone(),
                remaining_days: LOAN_PERIOD_DAYS - (now - r.borrowed_at).num_days(),
            })
            .collect()
    }
}

impl Default for LoanLedger {
    fn default() -> Self {
        LoanLedger::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
