pub mod builtin;
pub mod command;
pub mod completion;
pub mod env;
pub mod error;
pub mod execution;
pub mod output;
pub mod parse;
pub mod prompt;
pub mod redirect;
pub mod result;
pub mod shell;
pub mod tokenize;

use crate::env::PathEnv;

pub use crate::{error::ShellError, result::ExecResult, shell::Shell};

/// The program search path of the running process; empty when `PATH` is unset.
pub fn get_path_env() -> PathEnv {
    std::env::var_os("PATH")
        .map(|value| PathEnv::from_search_path(&value))
        .unwrap_or_default()
}
