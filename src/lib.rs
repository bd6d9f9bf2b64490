// Bibliotheca - Core Library
// Single-user library catalog and loan tracker

pub mod catalog;
pub mod ledger;
pub mod library;
pub mod loader;
pub mod store;

// Re-export commonly used types
pub use catalog::{CatalogEntry, CatalogIndex, MAX_ISBN_LEN, MAX_TITLE_LEN};
pub use ledger::{
    LedgerError, LoanLedger, LoanRecord, LoanStatus, LOAN_PERIOD_DAYS, MAX_LOANS,
};
pub use library::Library;
pub use loader::{load_catalog, load_catalog_from};
pub use store::{load_ledger, save_ledger, UNKNOWN_TITLE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
