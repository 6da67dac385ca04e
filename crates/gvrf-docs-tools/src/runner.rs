//! Trait definitions for running external tools.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

/// A single external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or resolved executable path
    pub program: PathBuf,

    /// Arguments, in order
    pub args: Vec<OsString>,

    /// Working directory (inherits the caller's when unset)
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Create an invocation with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Run in `dir` instead of the current directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Arguments as lossy UTF-8, for logs and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Shell-like rendering of the whole command line.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in self.args_lossy() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }

    /// File name of the program, without directories.
    pub fn program_name(&self) -> &str {
        self.program
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
    }
}

/// Result of a finished external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Whether the process exited successfully
    pub success: bool,

    /// Exit code, if the process exited normally
    pub code: Option<i32>,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

impl ToolOutput {
    /// A successful run with no output.
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            ..Default::default()
        }
    }

    /// A failed run with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Errors that can occur when running a tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Trait for running external commands.
pub trait ToolRunner {
    /// Run the command to completion and capture its output.
    ///
    /// A non-zero exit is reported through [`ToolOutput::success`], not as
    /// an error; only failing to start the process is an error.
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError> {
        tracing::debug!("Running {}", invocation.command_line());

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }

        let output = command.output().map_err(|e| ToolError::Spawn {
            program: invocation.program.display().to_string(),
            source: e,
        })?;

        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Log captured output line by line; warnings only when the tool failed.
pub fn log_output(tool: &str, output: &ToolOutput) {
    for line in output.stdout.lines().chain(output.stderr.lines()) {
        if line.trim().is_empty() {
            continue;
        }
        if output.success {
            tracing::debug!("[{}] {}", tool, line);
        } else {
            tracing::warn!("[{}] {}", tool, line);
        }
    }
}
