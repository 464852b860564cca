use std::path::PathBuf;

use anyhow::Result;
use anyhow::anyhow;
use dirs::home_dir;

pub const HOME_ENV_VAR: &str = "CINEMA_HOME";

/// `explicit` (from `--home` or `CINEMA_HOME`) or `~/.cinema`.
pub fn resolve_home(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let home = home_dir().ok_or_else(|| anyhow!("failed to determine home directory"))?;
    Ok(home.join(".cinema"))
}
