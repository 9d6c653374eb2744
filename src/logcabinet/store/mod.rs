//! # Storage Layer
//!
//! Everything that touches the on-disk shape of a cabinet lives here, so the
//! cabinet and sheet types can stay focused on their lifecycle rules.
//!
//! ## Storage Format
//!
//! ```text
//! <parent>/<cabinet>/
//! ├── .lccontrol         # name, description, item count (one per line)
//! ├── .lclock            # advisory lock target for control-file updates
//! ├── sheet-a            # one file per log sheet, named as given
//! └── sheet-b
//! ```
//!
//! Every file the cabinet itself owns starts with [`RESERVED_PREFIX`], which is
//! why sheet names may not.
//!
//! ## The CabinetStore Capability
//!
//! [`CabinetStore`] is the extension seam for cabinet-like storage. It exposes
//! the path resolution and control-file persistence a derived storage type
//! needs, without handing out the cabinet's fields to arbitrary callers.

use crate::error::Result;
use std::path::PathBuf;

pub mod control;
pub mod fs;
pub mod names;

/// Prefix shared by every file the cabinet manages for itself.
pub const RESERVED_PREFIX: &str = ".lc";

/// Fixed name of the control file inside a cabinet directory.
pub const CONTROL_FILE_NAME: &str = ".lccontrol";

/// Lock file held while the control file goes through read-modify-write.
pub const LOCK_FILE_NAME: &str = ".lclock";

/// Storage capability shared by cabinet-like collections.
pub trait CabinetStore {
    /// Full path of an item stored inside the cabinet directory.
    fn canonical_name(&self, item: &str) -> PathBuf;

    /// Reload name, description and count from the control file.
    fn read_control_file(&mut self) -> Result<()>;

    /// Persist the in-memory name, description and count to the control file.
    fn write_control_file(&self) -> Result<()>;
}
