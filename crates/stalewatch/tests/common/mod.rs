//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Create a temporary workspace with the given files.
pub fn workspace_with_files(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("should create temp dir");

    for (path, content) in files {
        write_file(dir.path(), path, content.as_bytes());
    }

    dir
}

/// Write `content` to `root/path`, creating parent directories.
pub fn write_file(root: &Path, path: &str, content: &[u8]) -> PathBuf {
    let full_path = root.join(path);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).expect("should create parent dirs");
    }
    fs::write(&full_path, content).expect("should write file");
    full_path
}

/// Path to the compiled stalewatch binary.
pub fn stalewatch_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stalewatch"))
}

/// Run the stalewatch binary in `dir` with colours and env overrides cleared.
pub fn run_stalewatch_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(stalewatch_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("STALEWATCH_DATE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute stalewatch binary")
}
