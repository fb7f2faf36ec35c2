use std::ffi::CStr;

use crate::env::ShellEnv;

const YELLOW_TEXT: &str = "\x1b[1;33m";
const BLUE_TEXT: &str = "\x1b[1;34m";
const RESET_TEXT: &str = "\x1b[0m";

/// `user@host ~/dir $ ` with the user/host part in yellow and the directory in blue.
pub fn render(env: &ShellEnv) -> String {
    let cwd = std::env::current_dir()
        .map(|dir| env.abbreviate_home(&dir))
        .unwrap_or_else(|_| "?".to_string());
    format!("{YELLOW_TEXT}{}@{}{BLUE_TEXT} {cwd} ${RESET_TEXT} ", username(), hostname())
}

fn username() -> String {
    if let Ok(user) = std::env::var("USER")
        && !user.is_empty()
    {
        return user;
    }
    let login = unsafe { libc::getlogin() };
    if login.is_null() {
        return String::new();
    }
    // getlogin returns a static buffer, copy it out right away
    unsafe { CStr::from_ptr(login) }.to_string_lossy().into_owned()
}

fn hostname() -> String {
    let mut buf = vec![0u8; 256];
    if unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) } == 0 {
        return from_nul_terminated(&buf);
    }
    String::new()
}

fn from_nul_terminated(buf: &[u8]) -> String {
    CStr::from_bytes_until_nul(buf)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nul_terminated_buffers() {
        assert_eq!(from_nul_terminated(b"host\0garbage"), "host");
        assert_eq!(from_nul_terminated(b"unterminated"), "");
    }

    #[test]
    fn render_has_user_host_and_directory() {
        let prompt = render(&ShellEnv::new());
        let cwd = std::env::current_dir().unwrap().display().to_string();
        assert!(prompt.starts_with(YELLOW_TEXT), "{prompt:?}");
        assert!(prompt.contains(&format!("{}@{}", username(), hostname())), "{prompt:?}");
        assert!(prompt.contains(&format!("{BLUE_TEXT} {cwd} $")), "{prompt:?}");
        assert!(prompt.ends_with(&format!("{RESET_TEXT} ")), "{prompt:?}");
    }
}
