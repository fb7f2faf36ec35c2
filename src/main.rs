use std::{
    io::{self, Write},
    process,
};

use anyhow::Context;
use rustyline::{Editor, error::ReadlineError};
use shll::{ExecResult, Shell, completion::ShellCompleter, env::ShellEnv, prompt};

fn main() -> anyhow::Result<()> {
    let env = ShellEnv::from_process_env();
    let histfile = env.histfile.clone();

    let mut rl = Editor::with_config(rustyline::Config::default())?;
    rl.set_helper(Some(ShellCompleter::new(env.path_env.clone())));
    if let Some(histfile) = &histfile {
        // a missing history file is normal on first start
        let _ = rl.load_history(histfile);
    }

    let mut shell = Shell::new(env);
    let code = loop {
        shell.reap_background();
        let readline = rl.readline(&prompt::render(&shell.env));
        let ret = match readline {
            Ok(line) => {
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;
                match shell.run_line(&line) {
                    Ok(ret) => ret,
                    Err(e) => {
                        shell.report_fatal(&e);
                        break 1;
                    }
                }
            }
            // Ctrl-C only abandons the current line.
            Err(ReadlineError::Interrupted) => ExecResult::Normal,
            Err(ReadlineError::Eof) => ExecResult::Exit(0),
            Err(e) => {
                return Err(anyhow::anyhow!(e));
            }
        };
        io::stdout().flush()?;

        if let ExecResult::Exit(code) = ret {
            break code;
        }
    };

    if let Some(histfile) = &histfile {
        rl.save_history(histfile)
            .with_context(|| format!("failed to save history to {}", histfile.display()))?;
    }
    process::exit(code)
}
