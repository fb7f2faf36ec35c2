use std::{
    io,
    os::{
        fd::{AsRawFd, BorrowedFd, RawFd},
        unix::process::ExitStatusExt,
    },
    process::ExitStatus,
};

use crate::{
    command::{Argv, Command},
    error::ShellError,
};

/// Status of a child whose program could not be executed.
pub const EXIT_NOT_FOUND: i32 = 127;

pub struct ChildBuilder<'a> {
    command: &'a Command,
    stdin: Option<BorrowedFd<'a>>,
    stdout: Option<BorrowedFd<'a>>,
}

impl<'a> ChildBuilder<'a> {
    pub fn new(command: &'a Command) -> Self {
        Self {
            command,
            stdin: None,
            stdout: None,
        }
    }

    pub fn stdin(&mut self, fd: BorrowedFd<'a>) -> &mut Self {
        self.stdin = Some(fd);
        self
    }

    pub fn stdout(&mut self, fd: BorrowedFd<'a>) -> &mut Self {
        self.stdout = Some(fd);
        self
    }

    /// Fork and exec the command.
    ///
    /// Everything the child needs is allocated before forking; between `fork` and `execvp`
    /// the child only calls `dup2`, `close`, `write` and `_exit`.
    pub fn spawn(&self) -> Result<ChildProcess, ShellError> {
        let argv = self.command.to_argv()?;
        let not_found = format!(
            "shll: {}: command not found\n",
            self.command.program().unwrap_or_default()
        );
        let stdin = self.stdin.map(|fd| fd.as_raw_fd());
        let stdout = self.stdout.map(|fd| fd.as_raw_fd());

        match unsafe { libc::fork() } {
            -1 => Err(ShellError::ProcessCreation(io::Error::last_os_error())),
            0 => unsafe { exec_child(&argv, stdin, stdout, not_found.as_bytes()) },
            pid => Ok(ChildProcess { pid }),
        }
    }
}

/// Runs in the forked child and never returns.
unsafe fn exec_child(argv: &Argv, stdin: Option<RawFd>, stdout: Option<RawFd>, not_found: &[u8]) -> ! {
    unsafe {
        for (fd, target) in [(stdin, libc::STDIN_FILENO), (stdout, libc::STDOUT_FILENO)] {
            if let Some(fd) = fd
                && fd != target
            {
                if libc::dup2(fd, target) == -1 {
                    libc::_exit(1);
                }
                libc::close(fd);
            }
        }

        libc::execvp(argv.program().as_ptr(), argv.as_ptr());

        libc::write(libc::STDERR_FILENO, not_found.as_ptr().cast(), not_found.len());
        libc::_exit(EXIT_NOT_FOUND)
    }
}

/// A forked child that has not been waited on yet.
#[derive(Debug)]
#[must_use]
pub struct ChildProcess {
    pid: libc::pid_t,
}

impl ChildProcess {
    pub fn id(&self) -> u32 {
        self.pid as u32
    }

    /// Block until the child terminates. Consumes the handle so it is waited on only once.
    pub fn wait(self) -> Result<ExitStatus, ShellError> {
        let mut status = 0;
        loop {
            if unsafe { libc::waitpid(self.pid, &mut status, 0) } != -1 {
                return Ok(ExitStatus::from_raw(status));
            }
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(ShellError::Wait {
                    pid: self.id(),
                    source: err,
                });
            }
        }
    }

    /// Reap the child if it has terminated, without blocking.
    pub fn try_wait(&self) -> io::Result<Option<ExitStatus>> {
        let mut status = 0;
        match unsafe { libc::waitpid(self.pid, &mut status, libc::WNOHANG) } {
            -1 => Err(io::Error::last_os_error()),
            0 => Ok(None),
            _ => Ok(Some(ExitStatus::from_raw(status))),
        }
    }
}

/// Shell-style status code: the exit code, or 128 plus the signal number.
pub fn status_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}
