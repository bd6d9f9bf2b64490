// 📚 Catalog Index - ordered book index keyed by ISBN
// Unbalanced binary search tree, built once at startup, read-only after

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Maximum ISBN length in characters; longer inputs are truncated, not rejected
pub const MAX_ISBN_LEN: usize = 13;

/// Maximum title length in characters; longer inputs are truncated, not rejected
pub const MAX_TITLE_LEN: usize = 255;

/// Hard-truncate a string to `max` characters (char-boundary safe)
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

// ============================================================================
// CATALOG ENTRY
// ============================================================================

/// A single book in the catalog
///
/// Immutable once inserted: duplicate ISBNs are silently ignored,
/// so the first insertion wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub isbn: String,
    pub title: String,
}

struct Node {
    entry: CatalogEntry,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(entry: CatalogEntry) -> Box<Node> {
        Box::new(Node {
            entry,
            left: None,
            right: None,
        })
    }
}

// ============================================================================
// CATALOG INDEX
// ============================================================================

/// Ordered index of catalog entries, keyed by byte-wise ISBN comparison.
///
/// The tree is deliberately unbalanced: average lookup cost is proportional
/// to tree height and degrades to linear on pre-sorted input. That is an
/// accepted trade-off for a catalog that is bulk-built once and then only
/// read. All walks are iterative, so sorted input costs time, not stack.
pub struct CatalogIndex {
    root: Option<Box<Node>>,
    len: usize,
}

impl CatalogIndex {
    pub fn new() -> Self {
        CatalogIndex { root: None, len: 0 }
    }

    /// Number of entries in the index
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a book, truncating ISBN and title to their maximum lengths.
    ///
    /// Returns `true` if the entry was inserted, `false` if the ISBN was
    /// already present (the existing entry is kept unchanged).
    pub fn insert(&mut self, isbn: &str, title: &str) -> bool {
        let isbn = truncate_chars(isbn, MAX_ISBN_LEN);
        let title = truncate_chars(title, MAX_TITLE_LEN);

        let mut cursor = &mut self.root;
        loop {
            match cursor {
                None => {
                    *cursor = Some(Node::new(CatalogEntry { isbn, title }));
                    self.len += 1;
                    return true;
                }
                Some(node) => match isbn.as_str().cmp(node.entry.isbn.as_str()) {
                    Ordering::Less => cursor = &mut node.left,
                    Ordering::Greater => cursor = &mut node.right,
                    // First write wins
                    Ordering::Equal => return false,
                },
            }
        }
    }

    /// Exact-key lookup by ordered descent; `None` if absent
    pub fn find_exact(&self, isbn: &str) -> Option<&CatalogEntry> {
        let isbn = truncate_chars(isbn, MAX_ISBN_LEN);
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            match isbn.as_str().cmp(node.entry.isbn.as_str()) {
                Ordering::Less => cursor = node.left.as_deref(),
                Ordering::Greater => cursor = node.right.as_deref(),
                Ordering::Equal => return Some(&node.entry),
            }
        }
        None
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Walks the tree in order (left, node, right) and collects up to
    /// `limit` matching ISBNs, so results are always in ascending ISBN
    /// order and the left subtree is exhausted or capped before the node
    /// itself is tested. An empty query matches every entry.
    pub fn find_by_title(&self, query: &str, limit: usize) -> Vec<String> {
        let mut matches = Vec::new();
        if limit == 0 {
            return matches;
        }

        let needle = query.to_lowercase();
        let mut stack: Vec<&Node> = Vec::new();
        let mut cursor = self.root.as_deref();

        while (cursor.is_some() || !stack.is_empty()) && matches.len() < limit {
            // Descend to the leftmost unvisited node
            while let Some(node) = cursor {
                stack.push(node);
                cursor = node.left.as_deref();
            }

            let Some(node) = stack.pop() else { break };

            // `contains("")` is true, which gives the vacuous-match policy
            if node.entry.title.to_lowercase().contains(&needle) {
                matches.push(node.entry.isbn.clone());
            }

            cursor = node.right.as_deref();
        }

        matches
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        CatalogIndex::new()
    }
}

// The derived recursive drop would overflow the stack on a degenerate
// (sorted-input) tree, so tear the nodes down with an explicit stack.
impl Drop for CatalogIndex {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        if let Some(root) = self.root.take() {
            stack.push(root);
        }
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> CatalogIndex {
        let mut index = CatalogIndex::new();
        index.insert("9780131103627", "The C Programming Language");
        index.insert("9780132350884", "Clean Code");
        index.insert("9780201616224", "The Pragmatic Programmer");
        index.insert("9780135957059", "The Pragmatic Programmer, 20th Anniversary");
        index
    }

    #[test]
    fn test_insert_and_find_exact() {
        let index = sample_index();
        assert_eq!(index.len(), 4);

        let entry = index.find_exact("9780132350884").unwrap();
        assert_eq!(entry.title, "Clean Code");
    }

    #[test]
    fn test_find_exact_absent() {
        let index = sample_index();
        assert!(index.find_exact("9999999999999").is_none());
        assert!(CatalogIndex::new().find_exact("9780132350884").is_none());
    }

    #[test]
    fn test_duplicate_isbn_first_write_wins() {
        let mut index = CatalogIndex::new();
        assert!(index.insert("9780131103627", "The C Programming Language"));
        assert!(!index.insert("9780131103627", "A Different Title"));

        assert_eq!(index.len(), 1);
        let entry = index.find_exact("9780131103627").unwrap();
        assert_eq!(entry.title, "The C Programming Language");
    }

    #[test]
    fn test_in_order_traversal_ascending_sorted_input() {
        // Pre-sorted input builds a fully right-leaning tree
        let mut index = CatalogIndex::new();
        for i in 0..50 {
            index.insert(&format!("{:013}", i), "Some Book");
        }

        let isbns = index.find_by_title("", 100);
        assert_eq!(isbns.len(), 50);
        for pair in isbns.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_in_order_traversal_ascending_reverse_input() {
        let mut index = CatalogIndex::new();
        for i in (0..50).rev() {
            index.insert(&format!("{:013}", i), "Some Book");
        }

        let isbns = index.find_by_title("", 100);
        assert_eq!(isbns.len(), 50);
        for pair in isbns.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_empty_query_returns_min_of_limit_and_total() {
        let index = sample_index();

        assert_eq!(index.find_by_title("", 10).len(), 4);
        assert_eq!(index.find_by_title("", 2).len(), 2);
        assert_eq!(index.find_by_title("", 0).len(), 0);
    }

    #[test]
    fn test_limit_keeps_smallest_isbns() {
        let index = sample_index();

        // All four titles match the empty query; capping at 2 must keep
        // the two smallest ISBNs, not whichever the walk reached first
        let isbns = index.find_by_title("", 2);
        assert_eq!(isbns, vec!["9780131103627", "9780132350884"]);
    }

    #[test]
    fn test_title_search_case_insensitive() {
        let index = sample_index();

        let isbns = index.find_by_title("CLEAN code", 10);
        assert_eq!(isbns, vec!["9780132350884"]);

        let isbns = index.find_by_title("pragmatic", 10);
        assert_eq!(
            isbns,
            vec!["9780135957059", "9780201616224"],
            "matches must come back in ascending ISBN order"
        );
    }

    #[test]
    fn test_title_search_no_match() {
        let index = sample_index();
        assert!(index.find_by_title("zzz no such book", 10).is_empty());
        assert!(CatalogIndex::new().find_by_title("code", 10).is_empty());
    }

    #[test]
    fn test_insert_truncates_long_fields() {
        let mut index = CatalogIndex::new();
        let long_isbn = "97801311036271234";
        let long_title = "x".repeat(300);
        index.insert(long_isbn, &long_title);

        // Lookup input is truncated the same way, so the long form still hits
        let entry = index.find_exact(long_isbn).unwrap();
        assert_eq!(entry.isbn, "9780131103627");
        assert_eq!(entry.title.chars().count(), MAX_TITLE_LEN);
    }

    #[test]
    fn test_degenerate_tree_drop_does_not_recurse() {
        // Sorted insertion order produces a 10_000-deep right spine;
        // dropping it must not blow the stack
        let mut index = CatalogIndex::new();
        for i in 0..10_000 {
            index.insert(&format!("{:013}", i), "Some Book");
        }
        drop(index);
    }
}
