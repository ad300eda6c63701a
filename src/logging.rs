use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Route `log` output to a file so it never lands on the alternate screen.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_file_logger(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // a second init (tests, repeated calls) keeps the first logger
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init();

    log::info!("unwind {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// Plain stderr logging for the headless commands
pub fn init_stderr_logger() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_log_file_in_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("unwind.log");
        init_file_logger(&path).unwrap();
        assert!(path.exists());
    }
}
