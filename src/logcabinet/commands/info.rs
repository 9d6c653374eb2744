use crate::cabinet::LogCabinet;
use crate::commands::{CabinetInfo, CabinetPaths, CmdMessage, CmdResult};
use crate::error::Result;

pub fn run(paths: &CabinetPaths, name: &str) -> Result<CmdResult> {
    let cabinet = LogCabinet::open(name, &paths.root)?;
    let mut result = CmdResult::default().with_cabinet(CabinetInfo::from(&cabinet));

    let present = cabinet.sheet_names()?.len();
    if present != cabinet.count() as usize {
        result.add_message(CmdMessage::warning(format!(
            "{} sheets on disk, {} recorded in the control file",
            present,
            cabinet.count()
        )));
    }
    Ok(result)
}
