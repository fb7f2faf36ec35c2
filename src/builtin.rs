use std::collections::HashMap;

use crate::{error::ShellError, result::ExecResult, shell::Shell, shell_out};

/// Receives the arguments after the built-in's name.
type BuiltinExecFunc = fn(&[String], &mut Shell) -> Result<ExecResult, ShellError>;

// single thread, so we use thread_local
thread_local! {
    /// list of built-in commands
    pub static BUILTIN_COMMANDS: HashMap<&'static str, BuiltinExecFunc> = {
        let mut map = HashMap::<&'static str, BuiltinExecFunc>::new();
        map.insert("exit", exit_command);
        map.insert("cd",   cd_command);
        map.insert("jobs", jobs_command);
        map
    };
}

pub fn lookup(name: &str) -> Option<BuiltinExecFunc> {
    BUILTIN_COMMANDS.with(|map| map.get(name).copied())
}

pub fn names() -> Vec<&'static str> {
    BUILTIN_COMMANDS.with(|map| map.keys().copied().collect())
}

/// `exit [n]`. An empty argument (from `exit ` with a trailing space) counts as none.
pub fn exit_command(args: &[String], _: &mut Shell) -> Result<ExecResult, ShellError> {
    match args.first().filter(|code| !code.is_empty()) {
        None => Ok(ExecResult::Exit(0)),
        Some(code) => code
            .parse::<i32>()
            .map(|code| ExecResult::Exit(code & 0xff))
            .map_err(|_| ShellError::ExitArgument(code.clone())),
    }
}

/// `cd [path]`. Without an argument nothing happens.
pub fn cd_command(args: &[String], shell: &mut Shell) -> Result<ExecResult, ShellError> {
    let Some(target) = args.first() else {
        return Ok(ExecResult::Normal);
    };

    let path = shell.env.expand_home(target);
    std::env::set_current_dir(&path).map_err(|source| ShellError::ChangeDirectory { path, source })?;
    Ok(ExecResult::Normal)
}

/// `jobs` lists the background jobs that are still running.
pub fn jobs_command(_: &[String], shell: &mut Shell) -> Result<ExecResult, ShellError> {
    shell.reap_background();
    let lines: Vec<_> = shell
        .jobs()
        .iter()
        .map(|job| format!("[{}] Running {}\n", job.id, job.command_line))
        .collect();
    for line in lines {
        shell_out!(shell, "{}", line);
    }
    Ok(ExecResult::Normal)
}
