use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use shll::{Shell, output::SharedBuffer};
use tempfile::TempDir;

/// Serializes tests that change the process-wide working directory.
static CWD_LOCK: Mutex<()> = Mutex::new(());

#[allow(dead_code)]
pub fn cwd_lock() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A shell with captured sinks and a scratch directory that is removed on drop.
pub struct TestShell {
    pub shell: Shell,
    pub stdout: SharedBuffer,
    pub stderr: SharedBuffer,
    dir: TempDir,
}

impl TestShell {
    pub fn build() -> Self {
        let (shell, stdout, stderr) = Shell::capture();
        let dir = tempfile::Builder::new().prefix("shll-tests").tempdir().unwrap();
        Self {
            shell,
            stdout,
            stderr,
            dir,
        }
    }

    #[allow(dead_code)]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `name` inside the scratch directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Run `line` after replacing every `{}` with the scratch directory.
    pub fn run(&mut self, line: &str) -> shll::ExecResult {
        let line = line.replace("{}", &self.dir.path().display().to_string());
        self.shell.run_line(&line).unwrap()
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).unwrap()
    }
}
