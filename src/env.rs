use std::{
    ffi::OsStr,
    ops::Deref,
    path::{Path, PathBuf},
};

use directories::BaseDirs;

const DEFAULT_HISTFILE: &str = ".shll_history";

/// Directories searched for programs to complete, in `PATH` order.
#[derive(Debug, Clone, Default)]
pub struct PathEnv {
    pub paths: Vec<PathBuf>,
}

impl PathEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Split a `PATH`-style value, dropping empty entries.
    pub fn from_search_path(value: &OsStr) -> Self {
        let paths = std::env::split_paths(value)
            .filter(|dir| !dir.as_os_str().is_empty())
            .collect();
        Self { paths }
    }
}

impl Deref for PathEnv {
    type Target = [PathBuf];

    fn deref(&self) -> &Self::Target {
        &self.paths
    }
}

/// Settings the shell reads from its environment once at startup.
#[derive(Debug, Clone, Default)]
pub struct ShellEnv {
    pub path_env: PathEnv,
    pub histfile: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl ShellEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(path_env: PathEnv, histfile: Option<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            path_env,
            histfile,
            home,
        }
    }

    /// `PATH`, `HISTFILE` (falling back to `~/.shll_history`) and the home directory.
    pub fn from_process_env() -> Self {
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        let histfile = std::env::var_os("HISTFILE")
            .filter(|file| !file.is_empty())
            .map(PathBuf::from)
            .or_else(|| home.as_ref().map(|home| home.join(DEFAULT_HISTFILE)));
        Self::build(crate::get_path_env(), histfile, home)
    }

    /// Expand a leading `~` to the home directory. Paths are returned unchanged when there
    /// is no `~` or no known home.
    pub fn expand_home(&self, path: &str) -> PathBuf {
        let rest = match path.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
            _ => return PathBuf::from(path),
        };
        match &self.home {
            Some(home) if rest.is_empty() => home.clone(),
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        }
    }

    /// Abbreviate the home directory prefix of `path` to `~`.
    pub fn abbreviate_home(&self, path: &Path) -> String {
        if let Some(home) = &self.home
            && let Ok(rest) = path.strip_prefix(home)
        {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", rest.display());
        }
        path.display().to_string()
    }
}
