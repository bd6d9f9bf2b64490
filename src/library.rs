// 🏛️ Library - shell-facing API over catalog + ledger
// Owns both components and the ledger path; persists after every mutation

use crate::catalog::{truncate_chars, CatalogEntry, CatalogIndex, MAX_ISBN_LEN, MAX_TITLE_LEN};
use crate::ledger::{LedgerError, LoanLedger, LoanRecord, LoanStatus};
use crate::store;
use chrono::Utc;
use std::path::PathBuf;

/// The library context: catalog index, loan ledger, and the ledger's
/// backing file.
///
/// Every mutating operation writes the ledger file synchronously before
/// returning, so on-disk state never lags in-memory state across an
/// observable operation boundary. Operator inputs longer than the model
/// limits are silently truncated, never rejected.
pub struct Library {
    catalog: CatalogIndex,
    ledger: LoanLedger,
    ledger_path: PathBuf,
}

impl Library {
    pub fn new(catalog: CatalogIndex, ledger: LoanLedger, ledger_path: PathBuf) -> Self {
        Library {
            catalog,
            ledger,
            ledger_path,
        }
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn ledger(&self) -> &LoanLedger {
        &self.ledger
    }

    /// Case-insensitive title substring search, capped at `max_results`,
    /// resolved to full entries in ascending ISBN order
    pub fn search_by_title(&self, query: &str, max_results: usize) -> Vec<CatalogEntry> {
        let query = truncate_chars(query.trim(), MAX_TITLE_LEN);
        self.catalog
            .find_by_title(&query, max_results)
            .iter()
            .filter_map(|isbn| self.catalog.find_exact(isbn).cloned())
            .collect()
    }

    /// Exact ISBN lookup; at most one entry can match
    pub fn search_by_isbn(&self, isbn: &str) -> Option<&CatalogEntry> {
        self.catalog.find_exact(isbn.trim())
    }

    /// Borrow a book by ISBN.
    ///
    /// Fails with `UnknownBook` if the ISBN is not in the catalog and
    /// with `CapacityExceeded` if the ledger is full. On success the new
    /// loan carries the catalog's title snapshot and the current time,
    /// and the ledger file is saved before returning. A duplicate loan
    /// for an already-borrowed ISBN is appended, not rejected.
    pub fn borrow(&mut self, isbn: &str) -> Result<LoanRecord, LedgerError> {
        let isbn = truncate_chars(isbn.trim(), MAX_ISBN_LEN);
        let entry = self
            .catalog
            .find_exact(&isbn)
            .ok_or_else(|| LedgerError::UnknownBook(isbn.clone()))?;
        let title = entry.title.clone();

        let record = self.ledger.add(&isbn, &title, Utc::now())?;
        self.persist()?;
        Ok(record)
    }

    /// Return a book by ISBN, removing exactly one matching loan.
    ///
    /// The catalog is never consulted: a return succeeds even for books
    /// that have since vanished from the catalog. Returns the removed
    /// record's title snapshot.
    pub fn return_book(&mut self, isbn: &str) -> Result<String, LedgerError> {
        let isbn = truncate_chars(isbn.trim(), MAX_ISBN_LEN);
        let removed = self.ledger.remove(&isbn)?;
        self.persist()?;
        Ok(removed.title)
    }

    /// Account rows for every active loan, in ledger storage order
    pub fn list_account(&self) -> Vec<LoanStatus> {
        self.ledger.list_active(Utc::now())
    }

    // A failed save is reported as SourceUnavailable; the in-memory
    // mutation stands, and the next successful save rewrites the complete
    // ledger from memory.
    fn persist(&self) -> Result<(), LedgerError> {
        store::save_ledger(&self.ledger_path, &self.ledger)
            .map_err(|e| LedgerError::SourceUnavailable(format!("{:#}", e)))
    }
}
