use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::CommandError;
use crate::traits::{CommandInvocation, CommandOutput, CommandRunner};

/// Runs commands as child processes, inheriting the current environment.
pub struct ProcessCommandRunner {
    echo: bool,
}

impl ProcessCommandRunner {
    /// A runner that streams each command's output to the console line by
    /// line as it is produced, while also capturing it.
    #[must_use]
    pub fn new() -> Self {
        Self { echo: true }
    }

    #[must_use]
    pub fn quiet() -> Self {
        Self { echo: false }
    }
}

impl Default for ProcessCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput, CommandError> {
        debug!(
            command = %invocation,
            cwd = %invocation.cwd.display(),
            env = ?invocation.env.iter().map(|(key, _)| key).collect::<Vec<_>>(),
            "spawning command"
        );

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                command: invocation.to_string(),
                source,
            })?;

        let child_stdout = child.stdout.take();
        let child_stderr = child.stderr.take();
        let (print_out, print_err): (fn(&str), fn(&str)) = if self.echo {
            (|line| print!("{line}"), |line| eprint!("{line}"))
        } else {
            (|_| {}, |_| {})
        };

        // Drain both pipes at once; a full stderr pipe would stall the child.
        let (stdout, stderr) = thread::scope(|scope| {
            let stderr_reader = scope.spawn(move || pump(child_stderr, print_err));
            let stdout = pump(child_stdout, print_out);
            let stderr = stderr_reader.join().unwrap_or_else(|_| {
                warn!(command = %invocation, "stderr reader panicked");
                String::new()
            });
            (stdout, stderr)
        });

        let status = child.wait().map_err(|source| CommandError::Wait {
            command: invocation.to_string(),
            source,
        })?;

        debug!(command = %invocation, status = ?status.code(), "command finished");

        Ok(CommandOutput {
            status: status.code(),
            stdout,
            stderr,
        })
    }
}

/// Reads `pipe` to the end, handing every line to `emit` as it arrives.
fn pump<R: Read>(pipe: Option<R>, emit: fn(&str)) -> String {
    let Some(pipe) = pipe else {
        return String::new();
    };

    let mut reader = BufReader::new(pipe);
    let mut captured = String::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&line);
                emit(&text);
                captured.push_str(&text);
            }
            Err(e) => {
                warn!(error = %e, "failed to read command output");
                break;
            }
        }
    }
    captured
}
