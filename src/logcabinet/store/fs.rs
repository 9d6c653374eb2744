use super::{LOCK_FILE_NAME, RESERVED_PREFIX};
use crate::error::{CabinetError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use fd_lock::{RwLock, RwLockWriteGuard};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Removes a temporary file on drop unless disarmed after a successful rename.
struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Replace `dir/file_name` with `contents` via write, sync, rename.
///
/// Readers see either the old file or the new one, never a torn write.
pub fn write_atomic(dir: &Path, file_name: &str, contents: &[u8]) -> Result<()> {
    let target = dir.join(file_name);
    let tmp_path = dir.join(format!("{}tmp-{}", RESERVED_PREFIX, Uuid::new_v4()));
    let mut guard = TempFileGuard::new(tmp_path.clone());

    {
        let mut file = File::create(&tmp_path).map_err(CabinetError::Io)?;
        file.write_all(contents).map_err(CabinetError::Io)?;
        file.sync_all().map_err(CabinetError::Io)?;
    }

    fs::rename(&tmp_path, &target).map_err(CabinetError::Io)?;
    guard.disarm();
    sync_dir(dir)
}

/// Make a rename inside `dir` durable.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(CabinetError::Io)
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}

/// Create a file that must not exist yet, opened for appending.
///
/// A collision is classified as `AlreadyExists`, anything else as I/O failure.
pub fn create_new_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .append(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => CabinetError::AlreadyExists(path.to_path_buf()),
            _ => CabinetError::Io(e),
        })
}

/// Advisory lock over a cabinet's control file.
///
/// `.lclock` itself is persistent and carries no state. Exclusion comes from
/// an OS file lock on it, which the kernel drops when the holder exits, so a
/// crashed writer never leaves the cabinet locked.
pub struct ControlLock {
    path: PathBuf,
    lock: RwLock<File>,
}

impl ControlLock {
    /// Open (creating if needed) the lock file of the cabinet at `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(CabinetError::Io)?;
        Ok(Self {
            path,
            lock: RwLock::new(file),
        })
    }

    /// Take the lock, failing immediately if another writer holds it. The
    /// lock is released when the guard drops.
    pub fn try_hold(&mut self) -> Result<RwLockWriteGuard<'_, File>> {
        match self.lock.try_write() {
            Ok(guard) => Ok(guard),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Err(CabinetError::strategy(
                format!("Control file is locked by another writer ({})", self.path.display()),
            )),
            Err(e) => Err(CabinetError::Io(e)),
        }
    }
}

/// Names of the regular files in `dir` that are not cabinet bookkeeping.
pub fn list_items(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(CabinetError::Io)? {
        let entry = entry.map_err(CabinetError::Io)?;
        if !entry.file_type().map_err(CabinetError::Io)?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with(RESERVED_PREFIX) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_replaces_and_leaves_no_tmp() {
        let temp = TempDir::new().unwrap();
        write_atomic(temp.path(), "target", b"first").unwrap();
        write_atomic(temp.path(), "target", b"second").unwrap();

        assert_eq!(fs::read(temp.path().join("target")).unwrap(), b"second");
        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n.to_string_lossy().starts_with(".lctmp"))
            .collect();
        assert!(leftovers.is_empty(), "leftover tmp files: {:?}", leftovers);
    }

    #[test]
    fn create_new_file_refuses_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sheet");
        create_new_file(&path).unwrap();
        let err = create_new_file(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn lock_is_exclusive_and_released_on_drop() {
        let temp = TempDir::new().unwrap();
        let mut first = ControlLock::open(temp.path()).unwrap();
        let mut second = ControlLock::open(temp.path()).unwrap();

        let held = first.try_hold().unwrap();
        let err = second.try_hold().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Strategy);

        drop(held);
        second.try_hold().unwrap();
    }

    #[test]
    fn leftover_lock_file_does_not_block() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(LOCK_FILE_NAME), "").unwrap();

        let mut lock = ControlLock::open(temp.path()).unwrap();
        lock.try_hold().unwrap();
    }

    #[test]
    fn atomic_write_into_missing_dir_fails_cleanly() {
        let temp = TempDir::new().unwrap();
        let err = write_atomic(&temp.path().join("gone"), "target", b"x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Strategy);
    }

    #[test]
    fn list_items_skips_bookkeeping_and_dirs() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b"), "").unwrap();
        fs::write(temp.path().join("a"), "").unwrap();
        fs::write(temp.path().join(".lccontrol"), "").unwrap();
        fs::create_dir(temp.path().join("subdir")).unwrap();

        assert_eq!(list_items(temp.path()).unwrap(), vec!["a", "b"]);
    }
}
