/// Separates the two stages of a pipeline.
pub const PIPE_DELIMITER: &str = " | ";
/// Separates arguments within one stage.
pub const ARG_DELIMITER: &str = " ";

/// Split `line` on every non-overlapping occurrence of `delimiter`.
///
/// Nothing is trimmed: consecutive delimiters yield empty tokens, and whatever follows the
/// last delimiter is always the final token, even when it is empty. A line without the
/// delimiter comes back as a single token.
pub fn split(line: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return vec![line.to_string()];
    }
    line.split(delimiter).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_single_space() {
        assert_eq!(split("ls -l /tmp", ARG_DELIMITER), ["ls", "-l", "/tmp"]);
    }

    #[test]
    fn no_delimiter_yields_whole_line() {
        assert_eq!(split("pwd", ARG_DELIMITER), ["pwd"]);
        assert_eq!(split("ls -l", PIPE_DELIMITER), ["ls -l"]);
    }

    #[test]
    fn empty_line_yields_one_empty_token() {
        assert_eq!(split("", ARG_DELIMITER), [""]);
    }

    #[test]
    fn keeps_empty_tokens() {
        assert_eq!(split("echo  a ", ARG_DELIMITER), ["echo", "", "a", ""]);
    }

    #[test]
    fn pipe_delimiter_is_not_overlapping() {
        assert_eq!(split("a | b | c", PIPE_DELIMITER), ["a", "b", "c"]);
        // the bare `|` without surrounding spaces is not a separator
        assert_eq!(split("a|b", PIPE_DELIMITER), ["a|b"]);
    }
}
