use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Lines, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, StoreError};

/// A self-contained structured record with a primary key.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn key(&self) -> Cow<'_, str>;
}

/// Lazy sequence of records produced by [`Repository::scan`].
pub type Scan<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// Append-only collection of records. No update or delete.
pub trait Repository<T: Record>: Send + Sync {
    fn append(&self, record: &T) -> Result<()>;

    fn scan(&self) -> Result<Scan<'_, T>>;

    /// Append `record` only if no stored record shares its key.
    /// Returns `false` (and writes nothing) when the key is taken.
    fn insert_if_absent(&self, record: &T) -> Result<bool>;

    fn find_by_key(&self, key: &str) -> Result<Option<T>> {
        for record in self.scan()? {
            let record = record?;
            if record.key() == key {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

// -- Line-delimited JSON file --

/// One record per line, newline-terminated. The append handle and all scans
/// share a lock so readers never see a half-written line.
pub struct JsonLinesStore<T> {
    path: PathBuf,
    writer: Mutex<File>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> JsonLinesStore<T> {
    /// Open `path` for appending, creating the file if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let writer = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

        debug!("Opened record store {}", path.display());
        Ok(Self {
            path,
            writer: Mutex::new(writer),
            _record: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, File>> {
        self.writer.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_line(&self, file: &mut File, record: &T) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        // Single write so the line lands whole.
        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn read(&self) -> Result<JsonLines<'_, T>> {
        let file = File::open(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(JsonLines {
            path: &self.path,
            lines: BufReader::new(file).lines(),
            line_no: 0,
            done: false,
            _guard: None,
            _record: PhantomData,
        })
    }
}

impl<T: Record> Repository<T> for JsonLinesStore<T> {
    fn append(&self, record: &T) -> Result<()> {
        let mut file = self.lock()?;
        self.write_line(&mut file, record)
    }

    fn scan(&self) -> Result<Scan<'_, T>> {
        let guard = self.lock()?;
        let mut lines = self.read()?;
        lines._guard = Some(guard);
        Ok(Box::new(lines))
    }

    fn insert_if_absent(&self, record: &T) -> Result<bool> {
        let mut file = self.lock()?;

        let key = record.key();
        for existing in self.read()? {
            if existing?.key() == key {
                return Ok(false);
            }
        }

        self.write_line(&mut file, record)?;
        Ok(true)
    }
}

/// Line iterator over a [`JsonLinesStore`] file. Blank lines are skipped;
/// the first unreadable or unparsable line ends the iteration with an error.
struct JsonLines<'a, T> {
    path: &'a Path,
    lines: Lines<BufReader<File>>,
    line_no: usize,
    done: bool,
    _guard: Option<MutexGuard<'a, File>>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Iterator for JsonLines<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let line = self.lines.next()?;
            self.line_no += 1;

            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    self.done = true;
                    return Some(Err(StoreError::Io {
                        path: self.path.to_path_buf(),
                        source,
                    }));
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            let parsed = serde_json::from_str(&line).map_err(|source| StoreError::Corrupt {
                path: self.path.to_path_buf(),
                line: self.line_no,
                source,
            });
            if parsed.is_err() {
                self.done = true;
            }
            return Some(parsed);
        }
    }
}

// -- In-memory --

/// Repository kept entirely in memory. Useful for tests and throwaway
/// instances.
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Record + Clone> Repository<T> for MemoryStore<T> {
    fn append(&self, record: &T) -> Result<()> {
        self.records
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .push(record.clone());
        Ok(())
    }

    fn scan(&self) -> Result<Scan<'_, T>> {
        let snapshot = self
            .records
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .clone();
        Ok(Box::new(snapshot.into_iter().map(Ok::<T, StoreError>)))
    }

    fn insert_if_absent(&self, record: &T) -> Result<bool> {
        let mut records = self.records.lock().map_err(|_| StoreError::LockPoisoned)?;
        if records.iter().any(|r| r.key() == record.key()) {
            return Ok(false);
        }
        records.push(record.clone());
        Ok(true)
    }
}
