use crate::cabinet::LogCabinet;
use crate::config::CabinetConfig;
use crate::sheet::SheetContents;
use chrono::{DateTime, Local};
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod info;
pub mod list;
pub mod remove;
pub mod sheet;
pub mod show;

/// Where cabinets live and where the front-end configuration is kept.
#[derive(Debug, Clone)]
pub struct CabinetPaths {
    pub root: PathBuf,
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Snapshot of a cabinet's metadata, detached from the open handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CabinetInfo {
    pub name: String,
    pub description: String,
    pub count: u32,
    pub directory: PathBuf,
}

impl From<&LogCabinet> for CabinetInfo {
    fn from(cabinet: &LogCabinet) -> Self {
        Self {
            name: cabinet.name().to_string(),
            description: cabinet.description().to_string(),
            count: cabinet.count(),
            directory: cabinet.directory().to_path_buf(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SheetListing {
    pub name: String,
    pub modified: Option<DateTime<Local>>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub cabinet: Option<CabinetInfo>,
    pub sheets: Vec<SheetListing>,
    pub contents: Option<SheetContents>,
    pub config: Option<CabinetConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_cabinet(mut self, cabinet: CabinetInfo) -> Self {
        self.cabinet = Some(cabinet);
        self
    }

    pub fn with_sheets(mut self, sheets: Vec<SheetListing>) -> Self {
        self.sheets = sheets;
        self
    }

    pub fn with_contents(mut self, contents: SheetContents) -> Self {
        self.contents = Some(contents);
        self
    }

    pub fn with_config(mut self, config: CabinetConfig) -> Self {
        self.config = Some(config);
        self
    }
}

#[cfg(test)]
pub(crate) fn test_paths(temp: &tempfile::TempDir) -> CabinetPaths {
    CabinetPaths {
        root: temp.path().to_path_buf(),
        config_dir: temp.path().join("config"),
    }
}
