use super::RESERVED_PREFIX;
use crate::error::{CabinetError, Result};

/// Validate a cabinet name.
///
/// A name must stay a single path component inside the parent directory, and
/// it ends up as the first line of the control file, so line breaks are out too.
pub fn validate_cabinet_name(name: &str) -> Result<()> {
    validate_component(name, "cabinet")
}

/// Validate a sheet name. On top of the cabinet rules, a sheet may not shadow
/// the files the cabinet keeps for itself.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    validate_component(name, "sheet")?;
    if name.starts_with(RESERVED_PREFIX) {
        return Err(CabinetError::strategy(format!(
            "Sheet name '{}' uses the reserved prefix '{}'",
            name, RESERVED_PREFIX
        )));
    }
    Ok(())
}

/// Descriptions are stored one per line.
pub fn validate_description(description: &str) -> Result<()> {
    if description.contains(|c: char| c == '\n' || c == '\r') {
        return Err(CabinetError::strategy(
            "Description cannot contain line breaks",
        ));
    }
    Ok(())
}

/// Single path component rules shared by every name we put on disk.
pub fn validate_component(name: &str, what: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CabinetError::strategy(format!("{} name cannot be empty", what)));
    }
    if name == "." || name == ".." {
        return Err(CabinetError::strategy(format!(
            "'{}' is not a valid {} name",
            name, what
        )));
    }
    if let Some(bad) = name.chars().find(|c| matches!(c, '/' | '\\' | '\0' | '\n' | '\r')) {
        return Err(CabinetError::strategy(format!(
            "{} name '{}' contains invalid character {:?}",
            what,
            name.escape_debug(),
            bad
        )));
    }
    Ok(())
}
