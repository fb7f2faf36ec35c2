use std::io::{self, Write};

use crate::{
    env::ShellEnv,
    error::ShellError,
    execution::{self, jobs::JobTable, process::status_code},
    output::SharedBuffer,
    parse,
    result::ExecResult,
    shell_err,
};

/// State carried from one input line to the next.
pub struct Shell {
    pub env: ShellEnv,
    pub stdout: Box<dyn Write>,
    pub stderr: Box<dyn Write>,
    jobs: JobTable,
    last_status: i32,
}

impl Shell {
    /// A shell reporting to the process's own stdout and stderr.
    pub fn new(env: ShellEnv) -> Self {
        Self::with_sinks(env, io::stdout(), io::stderr())
    }

    pub fn with_sinks(env: ShellEnv, stdout: impl Write + 'static, stderr: impl Write + 'static) -> Self {
        Self {
            env,
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
            jobs: JobTable::new(),
            last_status: 0,
        }
    }

    /// A shell with an empty environment whose output and diagnostics are collected in
    /// the returned buffers.
    pub fn capture() -> (Self, SharedBuffer, SharedBuffer) {
        let stdout = SharedBuffer::new();
        let stderr = SharedBuffer::new();
        let shell = Self::with_sinks(ShellEnv::new(), stdout.clone(), stderr.clone());
        (shell, stdout, stderr)
    }

    /// Parse and execute one line.
    ///
    /// Only fatal errors are returned; anything else is reported on the error sink and the
    /// line counts as failed.
    pub fn run_line(&mut self, line: &str) -> Result<ExecResult, ShellError> {
        match execution::execute(parse::parse(line), self) {
            Ok(ret) => Ok(ret),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                shell_err!(self, "{}\n", e);
                self.last_status = 1;
                Ok(ExecResult::Normal)
            }
        }
    }

    /// Report an error that ends the shell on the output sink.
    pub fn report_fatal(&mut self, err: &ShellError) {
        let _ = writeln!(self.stdout, "shll: {err}");
        let _ = self.stdout.flush();
    }

    /// Reap finished background jobs and report them on the error sink.
    pub fn reap_background(&mut self) {
        for job in self.jobs.reap() {
            let code = status_code(job.status);
            let _ = if code == 0 {
                writeln!(self.stderr, "[{}] Done {}", job.id, job.command_line)
            } else {
                writeln!(self.stderr, "[{}] Exit {} {}", job.id, code, job.command_line)
            };
        }
    }

    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    pub(crate) fn jobs_mut(&mut self) -> &mut JobTable {
        &mut self.jobs
    }

    pub(crate) fn set_last_status(&mut self, code: i32) {
        self.last_status = code;
    }
}
