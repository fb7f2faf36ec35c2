use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

/// Write to the shell's output sink. Write failures are ignored: there is nowhere left to
/// report them.
#[macro_export]
macro_rules! shell_out {
    ($shell:expr, $($arg:tt)*) => {{
        use ::std::io::Write as _;
        let _ = write!($shell.stdout, $($arg)*);
    }};
}

/// Write a `shll: `-prefixed diagnostic to the shell's error sink.
#[macro_export]
macro_rules! shell_err {
    ($shell:expr, $($arg:tt)*) => {{
        use ::std::io::Write as _;
        let _ = write!($shell.stderr, "shll: ");
        let _ = write!($shell.stderr, $($arg)*);
    }};
}

/// In-memory sink that can be handed to a shell while the caller keeps a handle on the
/// collected bytes.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }

    /// Return what has been written so far and empty the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.buf.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
