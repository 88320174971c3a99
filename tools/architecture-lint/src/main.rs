//! CLI entry point for the repo-local architecture lint.
//!
//! Usage: `architecture-lint [frontend-dir]`. Without an argument the
//! `frontend/` directory of the enclosing workspace is linted.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const WORKSPACE_NOT_FOUND: &str =
    "unable to locate workspace root (directory containing a workspace Cargo.toml)";

fn main() -> ExitCode {
    let target = match env::args_os().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => match workspace_root() {
            Some(root) => root.join("frontend"),
            None => return fail(&WORKSPACE_NOT_FOUND),
        },
    };
    match architecture_lint::lint_frontend_sources(&target) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

fn fail(message: &dyn std::fmt::Display) -> ExitCode {
    if let Err(write_err) = writeln!(io::stderr().lock(), "{message}") {
        drop(write_err);
    }
    ExitCode::FAILURE
}

fn workspace_root() -> Option<PathBuf> {
    let candidates = [
        env::var_os("CARGO_WORKSPACE_DIR").map(PathBuf::from),
        env::current_dir().ok(),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    ];
    candidates
        .iter()
        .flatten()
        .find_map(|start| find_workspace_root(start))
}

fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| declares_workspace(&dir.join("Cargo.toml")))
        .map(Path::to_path_buf)
}

fn declares_workspace(manifest: &Path) -> bool {
    fs::read_to_string(manifest).is_ok_and(|contents| contents.contains("[workspace]"))
}
