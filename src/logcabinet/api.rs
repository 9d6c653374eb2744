//! # API Facade
//!
//! A thin facade over the command layer, and the single entry point the
//! command-line client uses. Each method dispatches to one `commands::*::run`
//! and returns its structured [`CmdResult`]; nothing here prints or decides
//! exit codes.
//!
//! Programs that want to log through cabinets directly should use
//! [`crate::cabinet::LogCabinet`] and [`crate::sheet::LogSheet`] instead. The
//! facade exists for front ends that speak in whole commands.

use crate::commands;
use crate::error::Result;

pub struct CabinetApi {
    paths: commands::CabinetPaths,
}

impl CabinetApi {
    pub fn new(paths: commands::CabinetPaths) -> Self {
        Self { paths }
    }

    pub fn create_cabinet(&self, name: &str, description: &str) -> Result<commands::CmdResult> {
        commands::create::run(&self.paths, name, description)
    }

    pub fn cabinet_info(&self, name: &str) -> Result<commands::CmdResult> {
        commands::info::run(&self.paths, name)
    }

    pub fn list_sheets(&self, name: &str) -> Result<commands::CmdResult> {
        commands::list::run(&self.paths, name)
    }

    pub fn write_sheet(
        &self,
        cabinet: &str,
        sheet: &str,
        description: &str,
        entries: &[String],
        auto_sync: bool,
    ) -> Result<commands::CmdResult> {
        commands::sheet::run(&self.paths, cabinet, sheet, description, entries, auto_sync)
    }

    pub fn show_sheet(&self, cabinet: &str, sheet: &str) -> Result<commands::CmdResult> {
        commands::show::run(&self.paths, cabinet, sheet)
    }

    pub fn remove_cabinet(&self, name: &str) -> Result<commands::CmdResult> {
        commands::remove::run(&self.paths, name)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::CabinetPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{
    CabinetInfo, CabinetPaths, CmdMessage, CmdResult, MessageLevel, SheetListing,
};
