use crate::cabinet::LogCabinet;
use crate::commands::{CabinetPaths, CmdMessage, CmdResult};
use crate::error::Result;

pub fn run(paths: &CabinetPaths, name: &str) -> Result<CmdResult> {
    LogCabinet::remove(name, &paths.root)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Removed cabinet {}", name)));
    Ok(result)
}
