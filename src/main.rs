// Bibliotheca - interactive shell
// Thin I/O layer over the Library: menu loop, prompts, status output

use anyhow::Result;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use bibliotheca::{load_catalog, load_ledger, CatalogIndex, Library, LoanLedger, LoanStatus};

const DEFAULT_CATALOG_PATH: &str = "books.csv";
const DEFAULT_LEDGER_PATH: &str = "loans.txt";

/// Maximum number of search results shown per query
const MAX_RESULTS: usize = 10;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let catalog_path = PathBuf::from(args.get(1).map(String::as_str).unwrap_or(DEFAULT_CATALOG_PATH));
    let ledger_path = PathBuf::from(args.get(2).map(String::as_str).unwrap_or(DEFAULT_LEDGER_PATH));

    // Catalog load failure is not fatal: the shell keeps running with an
    // empty catalog and reports the condition
    let mut catalog = CatalogIndex::new();
    match load_catalog(&catalog_path, &mut catalog) {
        Ok(count) => println!("✓ Catalog loaded: {} books", count),
        Err(e) => eprintln!(
            "⚠ Could not load catalog from {}: {:#}\n  Continuing with an empty catalog.",
            catalog_path.display(),
            e
        ),
    }

    // Same for the ledger; an absent file already loads as empty
    let ledger = match load_ledger(&ledger_path, &catalog) {
        Ok(ledger) => ledger,
        Err(e) => {
            eprintln!(
                "⚠ Could not load ledger from {}: {:#}\n  Continuing with an empty ledger.",
                ledger_path.display(),
                e
            );
            LoanLedger::new()
        }
    };
    if !ledger.is_empty() {
        println!("✓ Restored {} active loan(s)", ledger.len());
    }

    let mut library = Library::new(catalog, ledger, ledger_path);

    loop {
        print_menu();
        let Some(choice) = read_input("Please choose an option (1-6): ")? else {
            break;
        };

        match choice.as_str() {
            "1" => search_by_title(&library)?,
            "2" => search_by_isbn(&library)?,
            "3" => borrow_book(&mut library)?,
            "4" => return_book(&mut library)?,
            "5" => show_account(&library),
            "6" => {
                println!("\nThank you for using Bibliotheca. Goodbye!");
                break;
            }
            _ => println!("\nInvalid input. Please choose an option between 1 and 6."),
        }
    }

    Ok(())
}

fn print_menu() {
    println!("\n========== Bibliotheca ==========");
    println!("1. Search books by title");
    println!("2. Search books by ISBN");
    println!("3. Borrow a book");
    println!("4. Return a book");
    println!("5. Show loan account");
    println!("6. Quit");
    println!("=================================");
}

/// Prompt and read one trimmed line; `None` means EOF on stdin
fn read_input(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut buffer = String::new();
    if io::stdin().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_string()))
}

fn search_by_title(library: &Library) -> Result<()> {
    let Some(query) = read_input("\nEnter a title or part of one: ")? else {
        return Ok(());
    };

    let results = library.search_by_title(&query, MAX_RESULTS);
    println!("\nFound {} book(s) matching '{}'.", results.len(), query);
    for (i, entry) in results.iter().enumerate() {
        println!("{}. ISBN: {}, Title: {}", i + 1, entry.isbn, entry.title);
    }

    Ok(())
}

fn search_by_isbn(library: &Library) -> Result<()> {
    let Some(isbn) = read_input("\nEnter an ISBN: ")? else {
        return Ok(());
    };

    match library.search_by_isbn(&isbn) {
        Some(entry) => println!("\nBook found: ISBN: {}, Title: {}", entry.isbn, entry.title),
        None => println!("\nNo book with ISBN '{}' found.", isbn),
    }

    Ok(())
}

fn borrow_book(library: &mut Library) -> Result<()> {
    let Some(isbn) = read_input("\nEnter the ISBN of the book to borrow: ")? else {
        return Ok(());
    };

    // Unlimited copies per title: an already-borrowed ISBN is lent again
    if library.ledger().contains(isbn.trim()) {
        println!("Note: this book is already on loan; lending another copy.");
    }

    match library.borrow(&isbn) {
        Ok(record) => println!("✓ Borrowed '{}'.", record.title),
        Err(e) => println!("❌ Could not borrow: {}", e),
    }

    Ok(())
}

fn return_book(library: &mut Library) -> Result<()> {
    let Some(isbn) = read_input("\nEnter the ISBN of the book to return: ")? else {
        return Ok(());
    };

    match library.return_book(&isbn) {
        Ok(title) => println!("✓ Returned '{}'.", title),
        Err(e) => println!("❌ Could not return: {}", e),
    }

    Ok(())
}

fn show_account(library: &Library) {
    let rows = library.list_account();

    println!("\n=== Your loan account ===");
    println!("Books currently on loan: {}\n", rows.len());

    if rows.is_empty() {
        println!("You have no books on loan.");
    } else {
        println!("{:<14} {:<50} {}", "ISBN", "Title", "Due");
        println!("{}", "-".repeat(80));
        for row in &rows {
            print!("{:<14} {:<50} ", row.isbn, row.title);
            print_due(row);
        }
    }

    println!("\n=========================");
}

fn print_due(row: &LoanStatus) {
    if row.remaining_days < 0 {
        println!("OVERDUE by {} day(s)!", -row.remaining_days);
    } else {
        println!("{} day(s) left", row.remaining_days);
    }
}
