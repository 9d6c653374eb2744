use crate::commands::{CabinetPaths, CmdMessage, CmdResult};
use crate::config::CabinetConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &CabinetPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = CabinetConfig::load(&paths.config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            let value = config.get(&key)?;
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(&paths.config_dir)?;
            result.add_message(CmdMessage::success(format!(
                "Set {} = {}",
                key,
                config.get(&key)?
            )));
        }
    }

    Ok(result.with_config(config))
}
