use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$GOFINANCES_HOME`, or `~/.gofinances`
pub fn gofinances_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("GOFINANCES_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".gofinances"))
}

pub fn ensure_gofinances_home() -> Result<PathBuf> {
    let dir = gofinances_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn log_path() -> Result<PathBuf> {
    Ok(ensure_gofinances_home()?.join("gofinances.log"))
}
