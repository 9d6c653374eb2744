//! # Log Cabinets
//!
//! A [`LogCabinet`] is a directory of log sheets plus a control file that
//! records the cabinet's name, description and the number of sheets it has
//! handed out. The control file is the source of truth across processes;
//! the accessors on an open cabinet return the values cached at open time,
//! refreshed after each [`LogCabinet::new_log_sheet`].
//!
//! ## Lifecycle
//!
//! ```text
//! create / open ──► (new_log_sheet)* ──► drop
//! ```
//!
//! [`LogCabinet::remove`] works on the directory, not on an instance, and must
//! not be used while a cabinet or one of its sheets is still open.
//!
//! ## Count Updates
//!
//! `new_log_sheet` creates the sheet file first and only then bumps the
//! persisted count, under the control lock, re-reading the control file so
//! that two processes sharing a cabinet do not lose increments. If the process
//! dies in between, the sheet exists but is not counted. That is tolerated:
//! [`LogCabinet::sheet_names`] lists sheets from the directory itself, and
//! `open` logs a warning when the directory holds more sheets than counted.

use crate::error::{CabinetError, Result};
use crate::sheet::LogSheet;
use crate::store::control::ControlFile;
use crate::store::fs::{list_items, ControlLock};
use crate::store::names::{validate_cabinet_name, validate_description, validate_sheet_name};
use crate::store::CabinetStore;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct LogCabinet {
    name: String,
    description: String,
    parent_dir: PathBuf,
    directory: PathBuf,
    count: u32,
    // Reserved for iterating over sheets.
    #[allow(dead_code)]
    cursor: usize,
}

impl LogCabinet {
    /// Create a new, empty cabinet at `parent_dir/name`.
    pub fn create<P: AsRef<Path>>(name: &str, description: &str, parent_dir: P) -> Result<Self> {
        validate_cabinet_name(name)?;
        validate_description(description)?;

        let parent_dir = parent_dir.as_ref().to_path_buf();
        let directory = parent_dir.join(name);
        fs::create_dir(&directory).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => CabinetError::AlreadyExists(directory.clone()),
            _ => CabinetError::Io(e),
        })?;

        let cabinet = Self {
            name: name.to_string(),
            description: description.to_string(),
            parent_dir,
            directory,
            count: 0,
            cursor: 0,
        };
        if let Err(e) = cabinet.write_control_file() {
            // Without a control file the directory is not a cabinet.
            let _ = fs::remove_dir_all(&cabinet.directory);
            return Err(e);
        }

        info!("Created log cabinet {}", cabinet.directory.display());
        Ok(cabinet)
    }

    /// Open an existing cabinet at `parent_dir/name`.
    pub fn open<P: AsRef<Path>>(name: &str, parent_dir: P) -> Result<Self> {
        validate_cabinet_name(name)?;

        let parent_dir = parent_dir.as_ref().to_path_buf();
        let directory = parent_dir.join(name);
        if !directory.is_dir() {
            return Err(CabinetError::DoesNotExist(directory));
        }

        let mut cabinet = Self {
            name: name.to_string(),
            description: String::new(),
            parent_dir,
            directory,
            count: 0,
            cursor: 0,
        };
        cabinet.read_control_file()?;

        let on_disk = cabinet.sheet_names()?.len();
        if on_disk > cabinet.count as usize {
            warn!(
                "Cabinet {} holds {} sheets but records {}",
                cabinet.directory.display(),
                on_disk,
                cabinet.count
            );
        }

        debug!("Opened log cabinet {}", cabinet.directory.display());
        Ok(cabinet)
    }

    /// Create a sheet inside this cabinet and count it.
    ///
    /// The count is only persisted once the sheet file exists. If counting
    /// fails, the new sheet file is removed again and the control file is left
    /// as it was.
    pub fn new_log_sheet(&mut self, name: &str, description: &str) -> Result<LogSheet> {
        validate_sheet_name(name)?;
        let sheet = LogSheet::create(name, description, &self.directory)?;

        if let Err(e) = self.bump_count() {
            let path = sheet.path().to_path_buf();
            drop(sheet);
            if let Err(rm) = fs::remove_file(&path) {
                warn!("Left uncounted sheet {} behind: {}", path.display(), rm);
            }
            return Err(e);
        }

        debug!(
            "Cabinet {} now holds {} sheets after adding {}",
            self.name, self.count, name
        );
        Ok(sheet)
    }

    /// Locked read-modify-write of the persisted item count.
    fn bump_count(&mut self) -> Result<()> {
        let mut lock = ControlLock::open(&self.directory)?;
        let _held = lock.try_hold()?;
        let mut control = ControlFile::load(&self.directory)?;
        control.count = control
            .count
            .checked_add(1)
            .ok_or_else(|| CabinetError::strategy(format!("Cabinet {} is full", self.name)))?;
        control.save(&self.directory)?;

        self.description = control.description;
        self.count = control.count;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn parent_dir(&self) -> &Path {
        &self.parent_dir
    }

    /// Sheets currently present in the cabinet directory, sorted by name.
    pub fn sheet_names(&self) -> Result<Vec<String>> {
        list_items(&self.directory)
    }

    /// Delete the cabinet at `parent_dir/name` and everything in it.
    pub fn remove<P: AsRef<Path>>(name: &str, parent_dir: P) -> Result<()> {
        validate_cabinet_name(name)?;

        let directory = parent_dir.as_ref().join(name);
        if !directory.is_dir() {
            return Err(CabinetError::DoesNotExist(directory));
        }
        fs::remove_dir_all(&directory).map_err(CabinetError::Io)?;

        info!("Removed log cabinet {}", directory.display());
        Ok(())
    }
}

impl CabinetStore for LogCabinet {
    fn canonical_name(&self, item: &str) -> PathBuf {
        self.directory.join(item)
    }

    fn read_control_file(&mut self) -> Result<()> {
        let control = ControlFile::load(&self.directory)?;
        if control.name != self.name {
            return Err(CabinetError::strategy(format!(
                "Control file in {} names cabinet '{}'",
                self.directory.display(),
                control.name
            )));
        }
        self.description = control.description;
        self.count = control.count;
        Ok(())
    }

    fn write_control_file(&self) -> Result<()> {
        ControlFile {
            name: self.name.clone(),
            description: self.description.clone(),
            count: self.count,
        }
        .save(&self.directory)
    }
}
