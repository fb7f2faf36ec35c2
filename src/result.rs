/// What the read loop should do after a line has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecResult {
    /// Leave the loop and end the shell with this status.
    Exit(i32),
    Normal,
}
