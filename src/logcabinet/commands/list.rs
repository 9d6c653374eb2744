use crate::cabinet::LogCabinet;
use crate::commands::{CabinetInfo, CabinetPaths, CmdMessage, CmdResult, SheetListing};
use crate::error::{CabinetError, Result};
use crate::store::CabinetStore;
use chrono::{DateTime, Local};
use std::fs;

pub fn run(paths: &CabinetPaths, name: &str) -> Result<CmdResult> {
    let cabinet = LogCabinet::open(name, &paths.root)?;
    let mut sheets = Vec::new();

    for sheet in cabinet.sheet_names()? {
        let meta = fs::metadata(cabinet.canonical_name(&sheet)).map_err(CabinetError::Io)?;
        let modified = meta.modified().ok().map(DateTime::<Local>::from);
        sheets.push(SheetListing {
            name: sheet,
            modified,
        });
    }

    let mut result = CmdResult::default().with_cabinet(CabinetInfo::from(&cabinet));
    if sheets.is_empty() {
        result.add_message(CmdMessage::info("No sheets in this cabinet."));
    }
    Ok(result.with_sheets(sheets))
}
