//! Minimal string key/value persistence under a state directory.
//!
//! One file per key, value written atomically via a temp file and rename.
//! Callers pass the root directory explicitly so stores can be rooted
//! anywhere; `state_dir()` is the production default.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where Playgate keeps all durable state:
///   - If env var `PLAYGATE_HOME` is set, use `$PLAYGATE_HOME/state/`.
///   - Else `~/.playgate/state/`.
#[must_use]
pub fn state_dir() -> PathBuf {
    if let Ok(home) = std::env::var("PLAYGATE_HOME") {
        return PathBuf::from(home).join("state");
    }
    let mut base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(".playgate");
    base.push("state");
    base
}

/// Path of a logical key under `root`.
#[must_use]
pub fn path_for(root: &Path, key: &str) -> PathBuf {
    root.join(key)
}

/// Ensure `root` exists (idempotent).
pub fn ensure_dir(root: &Path) -> io::Result<()> {
    fs::create_dir_all(root)
}

/// Atomically write `value` under `root / key`.
pub fn write_key(root: &Path, key: &str, value: &str) -> io::Result<()> {
    ensure_dir(root)?;

    let tmp_path = root.join(format!("{key}.tmp"));
    let final_path = path_for(root, key);

    // write to temp
    let mut f = fs::File::create(&tmp_path)?;
    f.write_all(value.as_bytes())?;
    f.flush()?;

    // best-effort durability where supported
    #[cfg(unix)]
    {
        let _ = f.sync_all();
        if let Ok(dir_fd) = fs::File::open(root) {
            let _ = dir_fd.sync_all();
        }
    }

    // atomic rename
    fs::rename(&tmp_path, &final_path)?;

    Ok(())
}

/// Read the string value of `root / key`. Returns `None` if missing or
/// unreadable.
#[must_use]
pub fn read_key(root: &Path, key: &str) -> Option<String> {
    let raw = fs::read_to_string(path_for(root, key)).ok()?;
    Some(raw.trim().to_string())
}

/// Best-effort delete of `root / key`.
pub fn remove_key(root: &Path, key: &str) -> io::Result<()> {
    let path = path_for(root, key);
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
