use crate::api::{CabinetApi, CabinetPaths};
use crate::config::CabinetConfig;
use crate::error::{CabinetError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the directory holding `config.json`.
pub const CONFIG_DIR_ENV: &str = "LOGCABINET_CONFIG_DIR";

/// Overrides the parent directory of cabinets when no `--root` is given.
pub const ROOT_ENV: &str = "LOGCABINET_ROOT";

pub struct CabinetContext {
    pub api: CabinetApi,
    pub config: CabinetConfig,
}

/// Pick the parent directory for cabinets: explicit flag, then environment,
/// then configuration, then the working directory.
pub fn resolve_root(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
    config: &CabinetConfig,
    cwd: &Path,
) -> PathBuf {
    flag.or(env)
        .or_else(|| config.root.clone())
        .unwrap_or_else(|| cwd.to_path_buf())
}

pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = ProjectDirs::from("gov", "nist", "logcabinet").ok_or_else(|| {
        CabinetError::strategy("Could not determine a configuration directory")
    })?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

pub fn initialize(cwd: &Path, root_flag: Option<PathBuf>) -> Result<CabinetContext> {
    let config_dir = config_dir()?;
    let config = CabinetConfig::load(&config_dir)?;

    let env_root = std::env::var_os(ROOT_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let root = resolve_root(root_flag, env_root, &config, cwd);
    tracing::debug!("Using cabinet root {}", root.display());

    let api = CabinetApi::new(CabinetPaths { root, config_dir });
    Ok(CabinetContext { api, config })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_root(root: &str) -> CabinetConfig {
        CabinetConfig {
            root: Some(PathBuf::from(root)),
            auto_sync: false,
        }
    }

    #[test]
    fn flag_wins() {
        let root = resolve_root(
            Some(PathBuf::from("/flag")),
            Some(PathBuf::from("/env")),
            &config_with_root("/config"),
            Path::new("/cwd"),
        );
        assert_eq!(root, PathBuf::from("/flag"));
    }

    #[test]
    fn env_beats_config() {
        let root = resolve_root(
            None,
            Some(PathBuf::from("/env")),
            &config_with_root("/config"),
            Path::new("/cwd"),
        );
        assert_eq!(root, PathBuf::from("/env"));
    }

    #[test]
    fn config_beats_cwd() {
        let root = resolve_root(None, None, &config_with_root("/config"), Path::new("/cwd"));
        assert_eq!(root, PathBuf::from("/config"));
    }

    #[test]
    fn falls_back_to_cwd() {
        let root = resolve_root(None, None, &CabinetConfig::default(), Path::new("/cwd"));
        assert_eq!(root, PathBuf::from("/cwd"));
    }
}
