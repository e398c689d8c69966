use std::{fs, io, path::Path};

/// Creates `dir` and its parents when missing.
pub fn ensure_dir(dir: impl AsRef<Path>) -> io::Result<()> {
    let dir = dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        tracing::debug!("Created directory {}", dir.display());
    }
    Ok(())
}

/// Touches the database file behind a `sqlite://` url so the driver can open
/// it without `mode=rwc`. In-memory and non-sqlite urls are left alone.
pub fn ensure_sqlite_file(db_url: &str) -> io::Result<()> {
    let Some(rest) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.contains(":memory:") {
        return Ok(());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)?;
    Ok(())
}
