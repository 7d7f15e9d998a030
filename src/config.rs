use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub(crate) const DB_ENV_VAR: &str = "SPENDGUARD_DB";
const DB_FILE_NAME: &str = "expenses.db";

/// Pull a `--db <path>` pair out of the argument list, wherever it appears.
/// The program name stays at index 0 of the returned arguments.
pub(crate) fn take_db_flag(args: Vec<String>) -> Result<(Option<PathBuf>, Vec<String>)> {
    let mut rest = Vec::with_capacity(args.len());
    let mut db_path = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--db" {
            let value = iter
                .next()
                .ok_or_else(|| anyhow::anyhow!("--db requires a path"))?;
            db_path = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--db=") {
            db_path = Some(PathBuf::from(value));
        } else {
            rest.push(arg);
        }
    }
    Ok((db_path, rest))
}

/// Flag beats environment beats the platform data directory.
pub(crate) fn resolve_db_path(flag: Option<PathBuf>, env: Option<OsString>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = env.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    default_db_path()
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendguard", "SpendGuard")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join(DB_FILE_NAME))
}
