use std::fs::{self, DirEntry, ReadDir};

use is_executable::IsExecutable;
use rustyline::{
    Helper, Highlighter, Hinter, Validator,
    completion::{Completer, Pair},
};

use crate::{
    builtin,
    env::PathEnv,
    tokenize::{ARG_DELIMITER, PIPE_DELIMITER},
};

/// Completes program names in the first word of either pipeline stage.
#[derive(Debug, Clone, Helper, Validator, Highlighter, Hinter)]
pub struct ShellCompleter {
    builtins: Vec<&'static str>,
    path_env: PathEnv,
}

impl ShellCompleter {
    pub fn new(path_env: PathEnv) -> Self {
        Self {
            builtins: builtin::names(),
            path_env,
        }
    }

    fn candidate_executable_in_path<'a>(
        prefix: &'a str,
        path_env: &'a PathEnv,
    ) -> impl Iterator<Item = DirEntry> + 'a {
        fn dir_candidate_executable(prefix: &str, reader: ReadDir) -> impl Iterator<Item = DirEntry> {
            reader.flatten().filter(move |entry| {
                entry.path().is_executable() && entry.file_name().to_string_lossy().starts_with(prefix)
            })
        }

        path_env
            .iter()
            .filter_map(move |dir| fs::read_dir(dir).ok().map(|entries| dir_candidate_executable(prefix, entries)))
            .flatten()
    }

    /// Sorted, deduplicated program names starting with `prefix`.
    pub fn candidates(&self, prefix: &str) -> Vec<Pair> {
        let mut matches: Vec<_> = self
            .builtins
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|r| r.to_string())
            .chain(
                Self::candidate_executable_in_path(prefix, &self.path_env)
                    .map(|entry| entry.file_name().to_string_lossy().to_string()),
            )
            .map(|cmd| {
                let mut replacement = cmd.clone();
                replacement.push_str(ARG_DELIMITER);
                Pair {
                    display: cmd,
                    replacement,
                }
            })
            .collect();
        matches.sort_unstable_by(|a, b| a.display.cmp(&b.display));
        matches.dedup_by(|a, b| a.display == b.display);
        matches
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let head = &line[..pos];
        let stage_start = head
            .rfind(PIPE_DELIMITER)
            .map(|index| index + PIPE_DELIMITER.len())
            .unwrap_or(0);
        let word = &head[stage_start..];

        // Only the program name is completed
        if word.contains(ARG_DELIMITER) {
            return Ok((pos, Vec::new()));
        }

        Ok((stage_start, self.candidates(word)))
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, os::unix::fs::PermissionsExt};

    use rustyline::history::DefaultHistory;

    use super::*;

    fn completer_with_bin() -> (tempfile::TempDir, ShellCompleter) {
        let dir = tempfile::tempdir().unwrap();
        for name in ["frobnicate", "frobscottle"] {
            let path = dir.path().join(name);
            fs::write(&path, "#!/bin/sh\n").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        fs::write(dir.path().join("frobdata"), "not executable").unwrap();
        let completer = ShellCompleter::new(PathEnv::from_paths(vec![dir.path().to_path_buf()]));
        (dir, completer)
    }

    fn displays(pairs: &[Pair]) -> Vec<&str> {
        pairs.iter().map(|pair| pair.display.as_str()).collect()
    }

    #[test]
    fn completes_executables_and_builtins() {
        let (_dir, completer) = completer_with_bin();
        assert_eq!(displays(&completer.candidates("frob")), ["frobnicate", "frobscottle"]);
        assert_eq!(displays(&completer.candidates("ex")), ["exit"]);
        assert_eq!(completer.candidates("ex")[0].replacement, "exit ");
    }

    #[test]
    fn completes_second_pipeline_stage() {
        let (_dir, completer) = completer_with_bin();
        let history = DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);
        let line = "ls -l | frobn";
        let (start, pairs) = completer.complete(line, line.len(), &ctx).unwrap();
        assert_eq!(start, "ls -l | ".len());
        assert_eq!(displays(&pairs), ["frobnicate"]);
    }

    #[test]
    fn arguments_are_not_completed() {
        let (_dir, completer) = completer_with_bin();
        let history = DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);
        let line = "cat frob";
        let (start, pairs) = completer.complete(line, line.len(), &ctx).unwrap();
        assert_eq!(start, line.len());
        assert!(pairs.is_empty());
    }
}
