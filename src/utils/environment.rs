use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "BOTANIX_DATA_DIR";

const APP_DIR_NAME: &str = "botanix";

/// Resolve the directory holding persisted history.
///
/// Precedence: explicit override (the `--data-dir` flag), then `BOTANIX_DATA_DIR`, then the
/// platform data directory (`~/.local/share/botanix` on Linux,
/// `~/Library/Application Support/botanix` on macOS).
pub fn get_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}
