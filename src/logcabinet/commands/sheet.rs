use crate::cabinet::LogCabinet;
use crate::commands::{CabinetInfo, CabinetPaths, CmdMessage, CmdResult};
use crate::error::Result;

/// Create a sheet in an existing cabinet and commit `entries` to it in order.
pub fn run(
    paths: &CabinetPaths,
    cabinet_name: &str,
    sheet_name: &str,
    description: &str,
    entries: &[String],
    auto_sync: bool,
) -> Result<CmdResult> {
    let mut cabinet = LogCabinet::open(cabinet_name, &paths.root)?;
    let mut sheet = cabinet.new_log_sheet(sheet_name, description)?;
    sheet.set_auto_sync(auto_sync);

    for entry in entries {
        sheet.write(entry)?;
    }
    if !auto_sync {
        sheet.sync()?;
    }

    let mut result = CmdResult::default().with_cabinet(CabinetInfo::from(&cabinet));
    result.add_message(CmdMessage::success(format!(
        "Wrote {} entries to {}/{}",
        entries.len(),
        cabinet.name(),
        sheet_name
    )));
    Ok(result)
}
