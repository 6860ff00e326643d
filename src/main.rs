//! texbatch - texture batch compiler driver
//!
//! Compiles every recognized texture in the source directory to `.dds`.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use texbatch::config::DispatchConfig;
use texbatch::textures::{DispatchReport, Dispatcher, DryRunInvoker, Texturec};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "texbatch")]
#[command(version)]
#[command(about = "Compile base-color, normal and roughness textures to BC3 .dds with texturec")]
struct Cli {
    /// JSON configuration file (fields not given keep their defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing source textures
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Existing directory receiving compiled .dds files
    #[arg(short, long)]
    dest: Option<PathBuf>,

    /// Filename substring marking base-color textures
    #[arg(long)]
    base_color: Option<String>,

    /// Filename substring marking normal maps
    #[arg(long)]
    normal: Option<String>,

    /// Filename substring marking roughness maps
    #[arg(long)]
    roughness: Option<String>,

    /// Texture compiler program
    #[arg(long, env = "TEXBATCH_COMPILER")]
    compiler: Option<String>,

    /// Print compiler commands without running them
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging (use RUST_LOG=debug for more detail)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<DispatchConfig> {
        let mut config = match &self.config {
            Some(path) => DispatchConfig::load(path)?,
            None => DispatchConfig::default(),
        };

        if let Some(source) = self.source {
            config.source_dir = source;
        }
        if let Some(dest) = self.dest {
            config.dest_dir = dest;
        }
        if let Some(pattern) = self.base_color {
            config.base_color_pattern = pattern;
        }
        if let Some(pattern) = self.normal {
            config.normal_pattern = pattern;
        }
        if let Some(pattern) = self.roughness {
            config.roughness_pattern = pattern;
        }
        if let Some(compiler) = self.compiler {
            config.compiler = compiler;
        }

        Ok(config)
    }
}

fn print_summary(report: &DispatchReport) {
    println!();
    println!(
        "Compiled: {}, failed: {}, unrecognized: {}",
        report.compiled.len(),
        report.failed.len(),
        report.unrecognized.len()
    );

    if report.has_failures() {
        println!("\nSome textures failed to compile:");
        for failure in &report.failed {
            println!("  FAILED {} ({}): {}", failure.file_name, failure.kind, failure.reason);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Only initialize logging if verbose or RUST_LOG is set.
    // Logs go to stderr so stdout carries only the progress lines.
    if cli.verbose || std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive(if cli.verbose { "texbatch=debug".parse()? } else { "texbatch=warn".parse()? }),
            )
            .init();
    }

    let dry_run = cli.dry_run;
    let config = cli.into_config()?;
    config.validate()?;

    let report = if dry_run {
        let compiler = DryRunInvoker::new(config.compiler.clone());
        Dispatcher::new(config, compiler).run()?
    } else {
        let compiler = Texturec::locate(&config.compiler);
        Dispatcher::new(config, compiler).run()?
    };

    print_summary(&report);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["texbatch"]);
        let config = cli.into_config().unwrap();
        assert_eq!(config, DispatchConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "texbatch",
            "--source",
            "in",
            "--dest",
            "out",
            "--normal",
            "_n",
            "--compiler",
            "/opt/bgfx/texturec",
            "--dry-run",
        ]);
        assert!(cli.dry_run);

        let config = cli.into_config().unwrap();
        assert_eq!(config.source_dir, PathBuf::from("in"));
        assert_eq!(config.dest_dir, PathBuf::from("out"));
        assert_eq!(config.normal_pattern, "_n");
        assert_eq!(config.base_color_pattern, "aseColor");
        assert_eq!(config.compiler, "/opt/bgfx/texturec");
    }
}
