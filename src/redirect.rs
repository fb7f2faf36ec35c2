use std::{
    fs::{File, OpenOptions},
    os::unix::fs::OpenOptionsExt,
    path::{Path, PathBuf},
};

use crate::{command::Command, error::ShellError};

pub const INPUT_OPERATOR: &str = "<";
pub const OUTPUT_OPERATOR: &str = ">";

/// Files created by an output redirection get `rw-r--r--` before the umask applies.
const OUTPUT_MODE: u32 = 0o644;

/// A file substituted for the standard input or output of one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    Input(PathBuf),
    Output(PathBuf),
}

impl Redirect {
    /// Detect a trailing `< file` or `> file` and strip both tokens from `command`.
    pub fn strip_from(command: &mut Command) -> Option<Self> {
        let len = command.len();
        if len < 2 {
            return None;
        }
        let filename = PathBuf::from(command.get(len - 1)?);
        let redirect = match command.get(len - 2)? {
            INPUT_OPERATOR => Self::Input(filename),
            OUTPUT_OPERATOR => Self::Output(filename),
            _ => return None,
        };
        command.terminate_at(len - 2);
        Some(redirect)
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Input(path) | Self::Output(path) => path,
        }
    }

    /// Input files are opened read-only; output files write-only, created or truncated.
    pub fn open(&self) -> Result<File, ShellError> {
        let result = match self {
            Self::Input(path) => File::open(path),
            Self::Output(path) => OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(OUTPUT_MODE)
                .open(path),
        };
        result.map_err(|source| ShellError::Redirect {
            path: self.path().to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Write};

    use super::*;

    #[test]
    fn strips_output_redirect() {
        let mut command = Command::from_line("echo hi > out.txt");
        let redirect = Redirect::strip_from(&mut command);
        assert_eq!(redirect, Some(Redirect::Output("out.txt".into())));
        assert_eq!(command.to_string(), "echo hi");
    }

    #[test]
    fn strips_input_redirect() {
        let mut command = Command::from_line("wc -l < in.txt");
        let redirect = Redirect::strip_from(&mut command);
        assert_eq!(redirect, Some(Redirect::Input("in.txt".into())));
        assert_eq!(command.to_string(), "wc -l");
    }

    #[test]
    fn operator_must_be_second_to_last() {
        let mut command = Command::from_line("echo > out.txt extra");
        assert_eq!(Redirect::strip_from(&mut command), None);
        assert_eq!(command.len(), 4);

        let mut command = Command::from_line(">");
        assert_eq!(Redirect::strip_from(&mut command), None);
    }

    #[test]
    fn output_open_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "previous contents\n").unwrap();

        let mut file = Redirect::Output(path.clone()).open().unwrap();
        file.write_all(b"new\n").unwrap();
        drop(file);

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn missing_input_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match Redirect::Input(path.clone()).open() {
            Err(ShellError::Redirect { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
