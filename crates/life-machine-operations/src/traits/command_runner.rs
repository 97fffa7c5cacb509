use std::fmt;
use std::path::{Path, PathBuf};

use crate::CommandError;

/// A single external command, its arguments, and extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: PathBuf,
}

impl CommandInvocation {
    #[must_use]
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// # Errors
    ///
    /// Returns `CommandError::Exited` unless the command exited with code 0.
    pub fn ensure_success(self, invocation: &CommandInvocation) -> Result<Self, CommandError> {
        if self.success() {
            Ok(self)
        } else {
            Err(CommandError::Exited {
                command: invocation.to_string(),
                code: self.status,
            })
        }
    }
}

pub trait CommandRunner: Send + Sync {
    /// Runs the command to completion. A non-zero exit is reported through
    /// `CommandOutput::status`, not as an error.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Spawn` if the process cannot be started.
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput, CommandError>;

    /// # Errors
    ///
    /// Returns an error if the process cannot be started or exits non-zero.
    fn run_checked(&self, invocation: &CommandInvocation) -> Result<CommandOutput, CommandError> {
        self.run(invocation)?.ensure_success(invocation)
    }
}
