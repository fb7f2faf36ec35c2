use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed forking child: {0}")]
    ProcessCreation(io::Error),
    #[error("pipe could not be initialized: {0}")]
    PipeCreation(io::Error),
    #[error("{}: {source}", .path.display())]
    Redirect { path: PathBuf, source: io::Error },
    #[error("cd: {}: {source}", .path.display())]
    ChangeDirectory { path: PathBuf, source: io::Error },
    #[error("{0:?}: argument contains a nul byte")]
    NulArgument(String),
    #[error("failed waiting for process {pid}: {source}")]
    Wait { pid: u32, source: io::Error },
    #[error("exit: {0}: numeric argument required")]
    ExitArgument(String),
}

impl ShellError {
    /// Fatal errors end the shell; everything else is reported and the loop goes on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ProcessCreation(_) | Self::PipeCreation(_))
    }
}
