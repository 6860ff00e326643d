//! Batch dispatcher
//!
//! One sequential pass over the source directory: print, classify, compile.
//! Unrecognized entries are reported and skipped. A failed compile is recorded
//! and the pass moves on to the next entry.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::classify::{split_name, Classifier, TextureKind};
use super::compiler::CompilerInvoker;
use crate::config::DispatchConfig;

/// A texture the compiler accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTexture {
    pub file_name: String,
    pub kind: TextureKind,
    pub output: PathBuf,
}

/// A texture whose compile did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTexture {
    pub file_name: String,
    pub kind: TextureKind,
    pub reason: String,
}

/// Outcome of one pass, entries in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub compiled: Vec<CompiledTexture>,
    pub failed: Vec<FailedTexture>,
    pub unrecognized: Vec<String>,
}

impl DispatchReport {
    /// Number of directory entries seen
    pub fn total(&self) -> usize {
        self.compiled.len() + self.failed.len() + self.unrecognized.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Classifies source textures and hands them to the compiler
pub struct Dispatcher<C: CompilerInvoker> {
    config: DispatchConfig,
    classifier: Classifier,
    compiler: C,
}

impl<C: CompilerInvoker> Dispatcher<C> {
    pub fn new(config: DispatchConfig, compiler: C) -> Self {
        let classifier = Classifier::from_config(&config);
        Self {
            config,
            classifier,
            compiler,
        }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Run over the source directory, printing progress to stdout.
    pub fn run(&self) -> Result<DispatchReport> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out)
    }

    /// Run over the source directory, printing progress to `out`.
    ///
    /// Fails only if the source directory cannot be listed.
    pub fn run_with_output<W: Write>(&self, out: &mut W) -> Result<DispatchReport> {
        let source_dir = &self.config.source_dir;
        let entries = std::fs::read_dir(source_dir)
            .with_context(|| format!("Failed to read source directory {}", source_dir.display()))?;

        let mut report = DispatchReport::default();

        for entry in entries {
            let entry = entry.with_context(|| {
                format!("Failed to list source directory {}", source_dir.display())
            })?;
            // Raw name builds the output path, lossy form is for display and matching
            let raw_name = entry.file_name();
            let file_name = raw_name.to_string_lossy().into_owned();

            writeln!(out, "compiling : {}", file_name)?;

            let Some(kind) = self.classifier.classify(&file_name) else {
                writeln!(out, "Undeclared texture type: {}", file_name)?;
                debug!("No pattern matches {}, skipping", file_name);
                report.unrecognized.push(file_name);
                continue;
            };

            let (base_name, _ext) = split_name(&raw_name);
            let input = entry.path();
            let output = self.config.output_path(base_name);
            let flags = kind.flags();
            debug!("{} classified as {}", file_name, kind);

            if let Some(line) = self.compiler.preview(&input, &output, flags) {
                writeln!(out, "{}", line)?;
            }

            match self.compiler.invoke(&input, &output, flags) {
                Ok(status) if status.success => {
                    info!("Compiled {} -> {}", file_name, output.display());
                    report.compiled.push(CompiledTexture {
                        file_name,
                        kind,
                        output,
                    });
                }
                Ok(status) => {
                    let reason = match status.code {
                        Some(code) => format!("compiler exited with code {}", code),
                        None => "compiler terminated by signal".to_string(),
                    };
                    warn!("Failed to compile {}: {}", file_name, reason);
                    report.failed.push(FailedTexture {
                        file_name,
                        kind,
                        reason,
                    });
                }
                Err(e) => {
                    warn!("Failed to compile {}: {}", file_name, e);
                    report.failed.push(FailedTexture {
                        file_name,
                        kind,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
