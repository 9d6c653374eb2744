use crate::cabinet::LogCabinet;
use crate::commands::{CabinetInfo, CabinetPaths, CmdResult};
use crate::error::Result;
use crate::sheet::SheetContents;
use crate::store::names::validate_sheet_name;
use crate::store::CabinetStore;

pub fn run(paths: &CabinetPaths, cabinet_name: &str, sheet_name: &str) -> Result<CmdResult> {
    let cabinet = LogCabinet::open(cabinet_name, &paths.root)?;
    validate_sheet_name(sheet_name)?;
    let contents = SheetContents::load(cabinet.canonical_name(sheet_name))?;

    Ok(CmdResult::default()
        .with_cabinet(CabinetInfo::from(&cabinet))
        .with_contents(contents))
}
