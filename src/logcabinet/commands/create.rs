use crate::cabinet::LogCabinet;
use crate::commands::{CabinetInfo, CabinetPaths, CmdMessage, CmdResult};
use crate::error::Result;

pub fn run(paths: &CabinetPaths, name: &str, description: &str) -> Result<CmdResult> {
    let cabinet = LogCabinet::create(name, description, &paths.root)?;
    let mut result = CmdResult::default().with_cabinet(CabinetInfo::from(&cabinet));
    result.add_message(CmdMessage::success(format!(
        "Created cabinet {} at {}",
        cabinet.name(),
        cabinet.directory().display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_paths;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn creates_cabinet_under_root() {
        let temp = TempDir::new().unwrap();
        let result = run(&test_paths(&temp), "cab1", "a cabinet").unwrap();

        let info = result.cabinet.unwrap();
        assert_eq!(info.count, 0);
        assert_eq!(info.directory, temp.path().join("cab1"));
        assert!(temp.path().join("cab1").is_dir());
    }

    #[test]
    fn second_create_reports_already_exists() {
        let temp = TempDir::new().unwrap();
        run(&test_paths(&temp), "cab1", "").unwrap();
        let err = run(&test_paths(&temp), "cab1", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }
}
