use super::{fs::write_atomic, CONTROL_FILE_NAME};
use crate::error::{CabinetError, Result};
use std::fs;
use std::io;
use std::path::Path;

/// In-memory form of a cabinet's control file.
///
/// On disk this is three lines, in order: name, description, item count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFile {
    pub name: String,
    pub description: String,
    pub count: u32,
}

impl ControlFile {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            count: 0,
        }
    }

    pub fn render(&self) -> String {
        format!("{}\n{}\n{}\n", self.name, self.description, self.count)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let name = lines
            .next()
            .ok_or_else(|| CabinetError::strategy("Control file is empty"))?;
        let description = lines
            .next()
            .ok_or_else(|| CabinetError::strategy("Control file is missing the description"))?;
        let count_line = lines
            .next()
            .ok_or_else(|| CabinetError::strategy("Control file is missing the item count"))?;
        let count = count_line.trim().parse::<u32>().map_err(|_| {
            CabinetError::strategy(format!("Invalid item count in control file: '{}'", count_line))
        })?;
        if lines.any(|l| !l.trim().is_empty()) {
            return Err(CabinetError::strategy(
                "Unexpected trailing content in control file",
            ));
        }
        if name.is_empty() {
            return Err(CabinetError::strategy("Control file has an empty name"));
        }

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            count,
        })
    }

    /// Read the control file of the cabinet rooted at `dir`.
    ///
    /// A missing file means there is no cabinet, not a corrupt one.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONTROL_FILE_NAME);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CabinetError::DoesNotExist(path))
            }
            Err(e) => return Err(CabinetError::Io(e)),
        };
        Self::parse(&text)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        write_atomic(dir, CONTROL_FILE_NAME, self.render().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn parses_rendered_form() {
        let control = ControlFile {
            name: "cab1".into(),
            description: "".into(),
            count: 7,
        };
        assert_eq!(control.render(), "cab1\n\n7\n");
        assert_eq!(ControlFile::parse(&control.render()).unwrap(), control);
    }

    #[test]
    fn rejects_corrupt_content() {
        let corrupt = [
            "",
            "cab1\n",
            "cab1\ndesc\n",
            "cab1\ndesc\nmany\n",
            "cab1\ndesc\n-1\n",
            "\ndesc\n0\n",
            "cab1\ndesc\n3\nextra\n",
        ];
        for bad in corrupt {
            let err = ControlFile::parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Strategy, "accepted {:?}", bad);
        }
    }

    #[test]
    fn load_missing_is_does_not_exist() {
        let temp = TempDir::new().unwrap();
        let err = ControlFile::load(temp.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DoesNotExist);
    }

    #[test]
    fn save_then_load() {
        let temp = TempDir::new().unwrap();
        let mut control = ControlFile::new("cab1", "test cabinet");
        control.count = 2;
        control.save(temp.path()).unwrap();

        assert_eq!(ControlFile::load(temp.path()).unwrap(), control);
    }
}
