//! Shared test scaffolding: a scratch project directory and a thin
//! `Command` wrapper for invoking the compiled `datallog` binary and
//! asserting on its exit status and captured output.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A bare `datallog` invocation with no project directory configured.
pub fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin("datallog"))
}

/// A scratch project directory: `DATALLOG_CURRENT_PATH` for any `datallog`
/// invocation built through [`Project::datallog`] points here.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create scratch project directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `relative` under the project root, creating
    /// parent directories as needed, and returns the absolute path.
    pub fn file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture parent directories");
        }
        std::fs::write(&path, contents).expect("write fixture file");
        path
    }

    /// A `datallog` invocation with `DATALLOG_CURRENT_PATH` pointed at this
    /// project and any ambient `DATALLOG_LOG_LEVEL` scrubbed so output is
    /// deterministic across developer environments.
    pub fn datallog(&self) -> Command {
        let mut cmd = cli();
        cmd.env("DATALLOG_CURRENT_PATH", self.dir.path());
        cmd.env_remove("DATALLOG_LOG_LEVEL");
        cmd
    }
}

/// A completed invocation, with chainable assertions in the style used
/// throughout these specs.
pub struct Ran {
    output: Output,
}

impl Ran {
    pub fn stdout(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.output.stdout)
    }

    pub fn stderr(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.output.stderr)
    }

    pub fn code(&self) -> i32 {
        self.output.status.code().unwrap_or(-1)
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout().contains(needle),
            "expected stdout to contain {needle:?}, got:\n{}",
            self.stdout()
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr().contains(needle),
            "expected stderr to contain {needle:?}, got:\n{}",
            self.stderr()
        );
        self
    }
}

pub trait CommandExt {
    /// Runs the command and asserts it exited with status 0.
    fn passes(&mut self) -> Ran;
    /// Runs the command and asserts it exited with a non-zero status.
    fn fails(&mut self) -> Ran;
}

impl CommandExt for Command {
    fn passes(&mut self) -> Ran {
        let output = self.output().expect("spawn datallog");
        assert!(
            output.status.success(),
            "expected success, got {}: stdout={}\nstderr={}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        Ran { output }
    }

    fn fails(&mut self) -> Ran {
        let output = self.output().expect("spawn datallog");
        assert!(
            !output.status.success(),
            "expected failure, got success: stdout={}",
            String::from_utf8_lossy(&output.stdout)
        );
        Ran { output }
    }
}
