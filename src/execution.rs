pub mod jobs;
pub mod process;

use std::{
    collections::VecDeque,
    io::{self, Write},
    os::fd::AsFd,
};

use crate::{
    builtin,
    command::Command,
    error::ShellError,
    execution::process::{ChildBuilder, ChildProcess, status_code},
    parse::ParsedLine,
    redirect::Redirect,
    result::ExecResult,
    shell::Shell,
};

/// Foreground children of one line, waited on in spawn order.
///
/// Children still pending when the group is dropped (after an error part-way through a
/// pipeline) are waited on then, so none is left behind.
struct ForegroundGroup {
    processes: VecDeque<ChildProcess>,
}

impl ForegroundGroup {
    fn new() -> Self {
        Self {
            processes: VecDeque::new(),
        }
    }

    fn push(&mut self, child: ChildProcess) {
        self.processes.push_back(child);
    }

    /// Wait on every child and return the status code of the last one.
    fn wait_all(&mut self) -> Result<i32, ShellError> {
        let mut code = 0;
        while let Some(child) = self.processes.pop_front() {
            code = status_code(child.wait()?);
        }
        Ok(code)
    }
}

impl Drop for ForegroundGroup {
    fn drop(&mut self) {
        for child in self.processes.drain(..) {
            let _ = child.wait();
        }
    }
}

pub fn execute(parsed: ParsedLine, shell: &mut Shell) -> Result<ExecResult, ShellError> {
    match parsed {
        ParsedLine::Simple(command) => execute_simple(&command, shell),
        ParsedLine::Piped(first, second) => execute_piped(&first, &second, shell),
        ParsedLine::Redirected(command, redirect) => execute_redirected(&command, &redirect, shell),
        ParsedLine::Background(command) => execute_background(command, shell),
    }
}

fn execute_simple(command: &Command, shell: &mut Shell) -> Result<ExecResult, ShellError> {
    if let Some(func) = command.program().and_then(builtin::lookup) {
        let ret = func(command.arguments(), shell)?;
        shell.set_last_status(0);
        return Ok(ret);
    }

    let mut group = ForegroundGroup::new();
    group.push(ChildBuilder::new(command).spawn()?);
    let code = group.wait_all()?;
    shell.set_last_status(code);
    Ok(ExecResult::Normal)
}

fn execute_piped(first: &Command, second: &Command, shell: &mut Shell) -> Result<ExecResult, ShellError> {
    let (reader, writer) = io::pipe().map_err(ShellError::PipeCreation)?;
    let mut group = ForegroundGroup::new();

    group.push(ChildBuilder::new(first).stdout(writer.as_fd()).spawn()?);
    // The reader only sees EOF once every copy of the write end is closed.
    drop(writer);

    let spawned = ChildBuilder::new(second).stdin(reader.as_fd()).spawn();
    drop(reader);
    group.push(spawned?);

    let code = group.wait_all()?;
    shell.set_last_status(code);
    Ok(ExecResult::Normal)
}

fn execute_redirected(
    command: &Command,
    redirect: &Redirect,
    shell: &mut Shell,
) -> Result<ExecResult, ShellError> {
    let file = redirect.open()?;
    let mut builder = ChildBuilder::new(command);
    match redirect {
        Redirect::Input(_) => builder.stdin(file.as_fd()),
        Redirect::Output(_) => builder.stdout(file.as_fd()),
    };

    let mut group = ForegroundGroup::new();
    group.push(builder.spawn()?);
    drop(builder);
    drop(file);

    let code = group.wait_all()?;
    shell.set_last_status(code);
    Ok(ExecResult::Normal)
}

fn execute_background(command: Command, shell: &mut Shell) -> Result<ExecResult, ShellError> {
    let child = ChildBuilder::new(&command).spawn()?;
    let pid = child.id();
    let id = shell.jobs_mut().push(child, command.to_string());
    let _ = writeln!(shell.stderr, "[{}] {}", id, pid);
    shell.set_last_status(0);
    Ok(ExecResult::Normal)
}
