//! JSON-backed persistence for the library and its order log.
//!
//! The in-memory sequence is the single source of truth; every mutation is
//! written through to disk before returning. Writes go to a temp file which
//! is then renamed over the target, so a failure mid-write never truncates
//! the previous contents.

use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;

use crate::domain::LibraryError;
use crate::models::{Book, Order};

/// Owns the ordered book sequence and its durable JSON file.
#[derive(Debug)]
pub struct LibraryStore {
    path: PathBuf,
    books: Vec<Book>,
}

impl LibraryStore {
    /// Open the store at `path`. A missing file is an empty library, not an
    /// error; a file that exists but does not parse is a `Storage` error so
    /// corruption is reported distinctly from "no books yet".
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let path = path.into();
        let books = read_json(&path)?.unwrap_or_default();
        Ok(Self { path, books })
    }

    /// An empty library bound to `path`, ignoring whatever is on disk.
    /// Lets the binary keep running after reporting a corrupt file.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            books: Vec::new(),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Add a book and persist the whole sequence synchronously. Title and
    /// author are required after trimming; on a validation or storage error
    /// nothing changes, in memory or on disk.
    pub fn add(
        &mut self,
        title: &str,
        author: &str,
        description: &str,
    ) -> Result<Book, LibraryError> {
        let title = title.trim();
        let author = author.trim();
        if title.is_empty() || author.is_empty() {
            return Err(LibraryError::Validation(
                "title and author are required".to_string(),
            ));
        }

        let book = Book {
            title: title.to_string(),
            author: author.to_string(),
            description: description.trim().to_string(),
        };
        self.books.push(book.clone());

        if let Err(e) = self.save() {
            self.books.pop();
            return Err(e);
        }
        Ok(book)
    }

    /// Rewrite the durable file from the in-memory sequence.
    pub fn save(&self) -> Result<(), LibraryError> {
        write_json(&self.path, &self.books)
    }

    /// Case-insensitive substring match on `title`, insertion order preserved.
    pub fn search_title(&self, term: &str) -> Vec<Book> {
        let needle = term.trim().to_lowercase();
        self.books
            .iter()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// One book chosen uniformly at random.
    pub fn pick_random(&self) -> Result<&Book, LibraryError> {
        self.books
            .choose(&mut rand::thread_rng())
            .ok_or(LibraryError::EmptyLibrary)
    }

    /// Whether any book's title equals `title`, case-insensitive after
    /// trimming. Read-only; order placement builds on this.
    pub fn is_available(&self, title: &str) -> bool {
        let wanted = title.trim().to_lowercase();
        self.books.iter().any(|b| b.title.to_lowercase() == wanted)
    }
}

/// Append-only log of received orders, persisted like the library itself.
pub struct OrderLog {
    path: PathBuf,
    orders: Vec<Order>,
}

impl OrderLog {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let path = path.into();
        let orders = read_json(&path)?.unwrap_or_default();
        Ok(Self { path, orders })
    }

    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            orders: Vec::new(),
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Append an order and persist synchronously; rolls back on write failure.
    pub fn record(&mut self, order: Order) -> Result<(), LibraryError> {
        self.orders.push(order);
        if let Err(e) = write_json(&self.path, &self.orders) {
            self.orders.pop();
            return Err(e);
        }
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, LibraryError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(LibraryError::Storage(format!(
                "failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };
    serde_json::from_str(&raw).map(Some).map_err(|e| {
        LibraryError::Storage(format!("failed to parse {}: {}", path.display(), e))
    })
}

// Pretty-printed UTF-8; serde_json leaves non-ASCII characters unescaped.
fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), LibraryError> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| LibraryError::Storage(e.to_string()))?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json.as_bytes())
        .and_then(|_| fs::rename(&tmp, path))
        .map_err(|e| {
            LibraryError::Storage(format!("failed to write {}: {}", path.display(), e))
        })
}
