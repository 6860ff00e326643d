//! External texture compiler invocation
//!
//! The actual compression is done by `texturec` (or a compatible tool). This
//! module only builds its command line and runs it, one blocking call per
//! texture. The `CompilerInvoker` trait lets the dispatcher run against a
//! dry-run printer or a test double instead of a real process.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, warn};

use super::classify::CompileFlags;

/// Exit status of one compiler run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileStatus {
    pub success: bool,
    /// Process exit code, `None` when killed by a signal
    pub code: Option<i32>,
}

impl CompileStatus {
    pub fn success() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub fn failed(code: Option<i32>) -> Self {
        Self {
            success: false,
            code,
        }
    }
}

impl From<ExitStatus> for CompileStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Compiler invocation errors
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs the texture compiler for one input
pub trait CompilerInvoker {
    /// Compile `input` into `output` with `flags`, blocking until done.
    fn invoke(&self, input: &Path, output: &Path, flags: CompileFlags)
        -> Result<CompileStatus, CompileError>;

    /// Line to print before invoking, if any.
    fn preview(&self, _input: &Path, _output: &Path, _flags: CompileFlags) -> Option<String> {
        None
    }
}

/// Arguments for one compile, in the order the compiler expects:
/// `-f <input> -o <output> -t BC3 -m -q h [-n | --linear]`
pub fn command_args(input: &Path, output: &Path, flags: CompileFlags) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-f".into(),
        input.as_os_str().to_os_string(),
        "-o".into(),
        output.as_os_str().to_os_string(),
    ];
    args.extend(flags.to_args().into_iter().map(OsString::from));
    args
}

/// Render a command line for display
pub fn command_line(program: &str, input: &Path, output: &Path, flags: CompileFlags) -> String {
    let mut line = program.to_string();
    for arg in command_args(input, output, flags) {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Spawns the real compiler process
#[derive(Debug, Clone)]
pub struct Texturec {
    program: PathBuf,
}

impl Texturec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the program through PATH.
    ///
    /// A program that cannot be found is still used as given. Every invocation
    /// then fails with a spawn error, which the dispatcher records per entry.
    pub fn locate(program: &str) -> Self {
        match which::which(program) {
            Ok(path) => {
                debug!("Using texture compiler at {}", path.display());
                Self::new(path)
            }
            Err(e) => {
                warn!("Texture compiler {:?} not found in PATH: {}", program, e);
                Self::new(program)
            }
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl CompilerInvoker for Texturec {
    fn invoke(
        &self,
        input: &Path,
        output: &Path,
        flags: CompileFlags,
    ) -> Result<CompileStatus, CompileError> {
        let args = command_args(input, output, flags);
        debug!("Running {} {:?}", self.program.display(), args);

        // stdout/stderr are inherited so compiler messages reach the terminal
        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|source| CompileError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        Ok(status.into())
    }
}

/// Reports each command instead of running it
#[derive(Debug, Clone)]
pub struct DryRunInvoker {
    program: String,
}

impl DryRunInvoker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CompilerInvoker for DryRunInvoker {
    fn invoke(
        &self,
        _input: &Path,
        _output: &Path,
        _flags: CompileFlags,
    ) -> Result<CompileStatus, CompileError> {
        Ok(CompileStatus::success())
    }

    fn preview(&self, input: &Path, output: &Path, flags: CompileFlags) -> Option<String> {
        Some(format!("  {}", command_line(&self.program, input, output, flags)))
    }
}
