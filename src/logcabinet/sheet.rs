//! # Log Sheets
//!
//! A [`LogSheet`] is one append-only log file. The first line of the file is
//! the sheet's description; every line after that is a numbered entry:
//!
//! ```text
//! Enrollment run, left index fingers
//! 1 opened gallery
//! 2 template 0001 failed
//! 	quality score below threshold
//! 3 closed gallery
//! ```
//!
//! A line break inside an entry is written as a continuation line starting
//! with a tab, so a line that starts with a digit always starts a new entry.
//!
//! ## Staging vs. Direct Writes
//!
//! Entries can be committed two ways:
//! - [`LogSheet::write`] commits a complete string as the next entry.
//! - [`LogSheet::append`] (or `write!`, via `fmt::Write`) accumulates text in
//!   the staging buffer, and [`LogSheet::new_entry`] commits it.
//!
//! The staging buffer is never flushed implicitly. Whatever is still staged
//! when the sheet is dropped is discarded.
//!
//! ## Numbering
//!
//! Entry numbers start at 1 and advance only after the line has been handed
//! to the file system, so entry N in the file is always the Nth successful
//! write. A failed write truncates the file back to its last complete line.

use crate::error::{CabinetError, Result};
use crate::store::fs::create_new_file;
use crate::store::names::validate_component;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Marks a continuation line inside a multi-line entry.
const CONTINUATION: char = '\t';

/// Append-only byte sink behind a sheet.
trait SheetFile: Write + fmt::Debug + Send {
    /// Cut the file back to `len` bytes.
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;

    fn sync_to_disk(&mut self) -> io::Result<()>;
}

impl SheetFile for File {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync_to_disk(&mut self) -> io::Result<()> {
        self.flush()?;
        self.sync_data()
    }
}

#[derive(Debug)]
pub struct LogSheet {
    path: PathBuf,
    file: Box<dyn SheetFile>,
    entry_number: u32,
    // Set once entry number u32::MAX has been committed.
    exhausted: bool,
    auto_sync: bool,
    current: String,
    committed_len: u64,
}

impl LogSheet {
    /// Create a new sheet at `parent_dir/name` and write its description.
    ///
    /// Fails with `AlreadyExists` if the file is already there; the existing
    /// file is left untouched.
    pub fn create<P: AsRef<Path>>(name: &str, description: &str, parent_dir: P) -> Result<Self> {
        validate_component(name, "sheet")?;
        let path = parent_dir.as_ref().join(name);
        let mut file = create_new_file(&path)?;

        let header = format!("{}\n", fold_lines(description));
        if let Err(e) = file.write_all(header.as_bytes()) {
            // The sheet never existed as far as the caller is concerned.
            let _ = fs::remove_file(&path);
            return Err(CabinetError::Io(e));
        }
        debug!("Created log sheet {}", path.display());

        Ok(Self {
            path,
            file: Box::new(file),
            entry_number: 1,
            exhausted: false,
            auto_sync: false,
            current: String::new(),
            committed_len: header.len() as u64,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commit `entry` as the next numbered line. The staging buffer is not
    /// touched.
    pub fn write(&mut self, entry: &str) -> Result<()> {
        if self.exhausted {
            return Err(CabinetError::strategy(
                "Entry numbers exhausted for this sheet",
            ));
        }

        let line = format!("{} {}\n", self.entry_number, fold_lines(entry));
        if let Err(e) = self.file.write_all(line.as_bytes()) {
            self.rollback();
            return Err(CabinetError::Io(e));
        }
        self.committed_len += line.len() as u64;
        match self.entry_number.checked_add(1) {
            Some(next) => self.entry_number = next,
            None => self.exhausted = true,
        }

        if self.auto_sync {
            self.sync()?;
        }
        Ok(())
    }

    /// Commit the staging buffer as the next entry, then clear it.
    ///
    /// If the line never reached the file, the staged text is kept so the
    /// caller can retry.
    pub fn new_entry(&mut self) -> Result<()> {
        let before = self.committed_len;
        let entry = std::mem::take(&mut self.current);
        let result = self.write(&entry);
        if result.is_err() && self.committed_len == before {
            self.current = entry;
        }
        result
    }

    /// Add text to the entry under construction.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.current.push_str(text);
        self
    }

    pub fn current_entry(&self) -> &str {
        &self.current
    }

    pub fn reset_current_entry(&mut self) {
        self.current.clear();
    }

    /// Number that the next committed entry will carry. Stays at `u32::MAX`
    /// once that number has been used.
    pub fn current_entry_number(&self) -> u32 {
        self.entry_number
    }

    /// Force everything written so far down to durable storage.
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_to_disk().map_err(CabinetError::Io)?;
        debug!(
            "Synced {} through entry {}",
            self.path.display(),
            self.last_committed()
        );
        Ok(())
    }

    /// When on, every `write`/`new_entry` syncs before returning.
    pub fn set_auto_sync(&mut self, state: bool) {
        self.auto_sync = state;
    }

    pub fn auto_sync(&self) -> bool {
        self.auto_sync
    }

    fn last_committed(&self) -> u32 {
        if self.exhausted {
            u32::MAX
        } else {
            self.entry_number - 1
        }
    }

    fn rollback(&mut self) {
        if let Err(e) = self.file.truncate_to(self.committed_len) {
            warn!(
                "Could not truncate {} back to {} bytes after failed write: {}",
                self.path.display(),
                self.committed_len,
                e
            );
        }
    }
}

impl fmt::Write for LogSheet {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.current.push_str(s);
        Ok(())
    }
}

impl Drop for LogSheet {
    fn drop(&mut self) {
        if !self.current.is_empty() {
            debug!(
                "Discarding {} staged bytes on close of {}",
                self.current.len(),
                self.path.display()
            );
        }
    }
}

fn fold_lines(text: &str) -> String {
    text.replace('\n', "\n\t")
}

/// One committed entry read back from a sheet file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    pub number: u32,
    pub text: String,
}

/// Parsed contents of a sheet file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetContents {
    pub description: String,
    pub entries: Vec<SheetEntry>,
}

impl SheetContents {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CabinetError::DoesNotExist(path.to_path_buf()))
            }
            Err(e) => return Err(CabinetError::Io(e)),
        };
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.split_terminator('\n');
        let mut description = lines
            .next()
            .ok_or_else(|| CabinetError::strategy("Sheet is missing its description line"))?
            .to_string();
        let mut entries: Vec<SheetEntry> = Vec::new();

        for (offset, line) in lines.enumerate() {
            if let Some(rest) = line.strip_prefix(CONTINUATION) {
                let target = match entries.last_mut() {
                    Some(entry) => &mut entry.text,
                    None => &mut description,
                };
                target.push('\n');
                target.push_str(rest);
                continue;
            }

            let (number, entry) = line.split_once(' ').ok_or_else(|| {
                CabinetError::strategy(format!("Malformed entry on line {}", offset + 2))
            })?;
            let number = number.parse::<u32>().map_err(|_| {
                CabinetError::strategy(format!(
                    "Invalid entry number '{}' on line {}",
                    number,
                    offset + 2
                ))
            })?;
            entries.push(SheetEntry {
                number,
                text: entry.to_string(),
            });
        }

        Ok(Self {
            description,
            entries,
        })
    }
}
