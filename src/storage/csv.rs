//! Flat-file storage for contacts
//!
//! Contacts are stored one per line as `name,email,phone`. Fields are joined
//! with a bare comma and never quoted, so a field containing a comma will
//! not survive a round trip.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::{Contact, ContactBook};

/// Default file name, relative to the working directory
pub const DEFAULT_FILE: &str = "contacts.csv";

/// Store for contacts in comma-delimited format
pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    /// Creates a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all contacts, treating any read failure as an empty book
    pub fn load(&self) -> ContactBook {
        self.try_load().unwrap_or_default()
    }

    /// Loads all contacts, reporting read failures.
    ///
    /// A missing file is not an error. Lines that are not valid UTF-8 or do
    /// not split into exactly three fields are skipped.
    pub fn try_load(&self) -> Result<ContactBook> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ContactBook::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to open contact file: {}", self.path.display())
                })
            }
        };

        file.lock_shared()
            .context("Failed to acquire read lock on contact file")?;

        let reader = BufReader::new(&file);
        let mut book = ContactBook::new();

        for (line_num, line) in reader.split(b'\n').enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            let Ok(line) = String::from_utf8(line) else {
                continue;
            };
            if let Some(contact) = parse_line(&line) {
                book.add(contact);
            }
        }

        // Lock is released when file is dropped
        Ok(book)
    }

    /// Writes every contact to the store (full rewrite)
    pub fn save(&self, book: &ContactBook) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.temp_path();

        let result = write_lines(&temp_path, book).and_then(|()| {
            fs::rename(&temp_path, &self.path).with_context(|| {
                format!(
                    "Failed to rename {} to {}",
                    temp_path.display(),
                    self.path.display()
                )
            })
        });

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_lines(path: &Path, book: &ContactBook) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to create temp file: {}", path.display()))?;

    file.lock_exclusive()
        .context("Failed to acquire write lock on contact file")?;

    let mut writer = BufWriter::new(&file);
    for contact in book {
        writeln!(writer, "{}", format_line(contact)).context("Failed to write contact")?;
    }

    writer.flush().context("Failed to flush contact file")
}

/// Serializes a contact as one unescaped comma-joined line
pub fn format_line(contact: &Contact) -> String {
    format!("{},{},{}", contact.name(), contact.email(), contact.phone())
}

/// Parses a stored line, returning `None` unless it has exactly three fields
pub fn parse_line(line: &str) -> Option<Contact> {
    let mut parts = line.trim().split(',');
    let name = parts.next()?;
    let email = parts.next()?;
    let phone = parts.next()?;

    if parts.next().is_some() {
        return None;
    }

    Some(Contact::new(name, email, phone))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn sample() -> ContactBook {
        vec![
            Contact::new("John Doe", "john@example.com", "1234567890"),
            Contact::new("Jane Smith", "jane@example.com", "0987654321"),
        ]
        .into()
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = ContactStore::new(dir.path().join("contacts.csv"));

        assert!(store.try_load().unwrap().is_empty());
        assert!(store.load().is_empty());
    }

    #[test]
    fn unreadable_source_loads_empty() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read as a file
        let store = ContactStore::new(dir.path());

        assert!(store.load().is_empty());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = ContactStore::new(dir.path().join("contacts.csv"));

        store.save(&sample()).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn save_writes_raw_lines() {
        let dir = TempDir::new().unwrap();
        let store = ContactStore::new(dir.path().join("contacts.csv"));

        store.save(&sample()).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "John Doe,john@example.com,1234567890\nJane Smith,jane@example.com,0987654321\n"
        );
    }

    #[test]
    fn save_empty_book_truncates() {
        let dir = TempDir::new().unwrap();
        let store = ContactStore::new(dir.path().join("contacts.csv"));

        store.save(&sample()).unwrap();
        store.save(&ContactBook::new()).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_skips_malformed_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.csv");
        fs::write(
            &path,
            "John Doe,john@example.com,1234567890\nonly,two\n\na,b,c,d\n",
        )
        .unwrap();

        let loaded = ContactStore::new(&path).load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.list(), ["John Doe, john@example.com, 1234567890"]);
    }

    #[test]
    fn load_does_not_revalidate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.csv");
        fs::write(&path, ",no-at-sign,1\n").unwrap();

        let loaded = ContactStore::new(&path).load();
        assert_eq!(loaded, ContactBook::from(vec![Contact::new("", "no-at-sign", "1")]));
    }

    #[test]
    fn load_trims_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.csv");
        fs::write(&path, "  Ann,ann@x.org,0987654321  \r\n").unwrap();

        let loaded = ContactStore::new(&path).load();
        assert_eq!(loaded, ContactBook::from(vec![Contact::new("Ann", "ann@x.org", "0987654321")]));
    }

    #[test]
    fn embedded_comma_breaks_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ContactStore::new(dir.path().join("contacts.csv"));

        let book: ContactBook = vec![Contact::new("Doe, John", "j@x", "1234567890")].into();
        store.save(&book).unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = ContactStore::new(dir.path().join("nested").join("dir").join("contacts.csv"));

        store.save(&sample()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let store = ContactStore::new(dir.path().join("contacts.csv"));

        store.save(&sample()).unwrap();

        assert!(!dir.path().join("contacts.csv.tmp").exists());
    }

    #[test]
    fn save_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // The destination is an existing directory, so the rename fails
        let target = dir.path().join("taken");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();
        let store = ContactStore::new(&target);

        let book = sample();
        assert!(store.save(&book).is_err());
        assert_eq!(book.len(), 2);
        assert!(!dir.path().join("taken.tmp").exists());
    }

    #[test]
    fn load_skips_lines_that_are_not_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.csv");
        let mut content = b"John Doe,john@example.com,1234567890\n".to_vec();
        content.extend_from_slice(b"Jos\xe9,jose@example.com,5555555555\n");
        content.extend_from_slice(b"Jane Smith,jane@example.com,0987654321\n");
        fs::write(&path, content).unwrap();

        let store = ContactStore::new(&path);
        assert_eq!(store.try_load().unwrap(), sample());
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn unreadable_source_is_an_error_for_try_load() {
        let dir = TempDir::new().unwrap();
        let store = ContactStore::new(dir.path());

        assert!(store.try_load().is_err());
    }

    #[test]
    fn parse_line_field_counts() {
        assert_eq!(parse_line("a,b,c"), Some(Contact::new("a", "b", "c")));
        assert_eq!(parse_line("a,b,"), Some(Contact::new("a", "b", "")));
        assert_eq!(parse_line("a,b"), None);
        assert_eq!(parse_line("a,b,c,d"), None);
        assert_eq!(parse_line(""), None);
    }

    fn field() -> impl Strategy<Value = String> {
        "[^,\\s][^,\\r\\n]{0,18}[^,\\s]"
    }

    proptest! {
        #[test]
        fn round_trip_without_commas(
            records in prop::collection::vec((field(), field(), field()), 0..8)
        ) {
            let dir = TempDir::new().unwrap();
            let store = ContactStore::new(dir.path().join("contacts.csv"));

            let book: ContactBook = records
                .into_iter()
                .map(|(n, e, p)| Contact::new(n, e, p))
                .collect();

            store.save(&book).unwrap();
            prop_assert_eq!(store.load(), book);
        }
    }
}
