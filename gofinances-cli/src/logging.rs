use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

/// Log to stderr. Level comes from `RUST_LOG`, default `info`.
pub fn init_stderr() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();
}

/// Log to an append-only file so the alternate screen stays clean.
pub fn init_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
