use std::{
    ffi::{CStr, CString, c_char},
    fmt,
    ops::Index,
    ptr,
};

use crate::{
    error::ShellError,
    tokenize::{self, ARG_DELIMITER},
};

/// One pipeline stage: the program name followed by its arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    args: Vec<String>,
}

impl Command {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    /// Tokenize one stage of the input line.
    pub fn from_line(line: &str) -> Self {
        Self::new(tokenize::split(line, ARG_DELIMITER))
    }

    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Everything after the program name.
    pub fn arguments(&self) -> &[String] {
        self.args.get(1..).unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// End the argument list at `index`, dropping that slot and everything after it.
    pub fn terminate_at(&mut self, index: usize) {
        self.args.truncate(index);
    }

    pub fn to_argv(&self) -> Result<Argv, ShellError> {
        let strings = self
            .args
            .iter()
            .map(|arg| CString::new(arg.as_str()).map_err(|_| ShellError::NulArgument(arg.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Argv::new(strings))
    }
}

impl Index<usize> for Command {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        &self.args[index]
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.join(ARG_DELIMITER))
    }
}

/// Argument vector in the layout `execvp` expects.
///
/// `pointers` holds one entry per argument plus a trailing null. The pointers borrow the
/// heap buffers of `strings`, which never move while the `Argv` is alive.
pub struct Argv {
    strings: Vec<CString>,
    pointers: Vec<*const c_char>,
}

impl Argv {
    fn new(strings: Vec<CString>) -> Self {
        let pointers = strings
            .iter()
            .map(|s| s.as_ptr())
            .chain(std::iter::once(ptr::null()))
            .collect();
        Self { strings, pointers }
    }

    /// Number of arguments, not counting the terminator.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn program(&self) -> &CStr {
        self.strings.first().map(CString::as_c_str).unwrap_or(c"")
    }

    pub fn as_ptr(&self) -> *const *const c_char {
        self.pointers.as_ptr()
    }
}
