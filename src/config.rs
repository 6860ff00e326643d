//! Dispatch configuration
//!
//! Directories, classification patterns and the compiler program. Defaults
//! follow the usual asset layout: `textures/` in, `compiled/` out.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::textures::TextureKind;

pub const DEFAULT_SOURCE_DIR: &str = "textures/";
pub const DEFAULT_DEST_DIR: &str = "compiled/";
pub const DEFAULT_BASE_COLOR_PATTERN: &str = "aseColor";
pub const DEFAULT_NORMAL_PATTERN: &str = "ormal";
pub const DEFAULT_ROUGHNESS_PATTERN: &str = "oughness";
pub const DEFAULT_COMPILER: &str = "texturec";

/// Configuration for a dispatch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Directory listed for input textures (not recursed)
    pub source_dir: PathBuf,

    /// Directory receiving `.dds` output, must already exist
    pub dest_dir: PathBuf,

    /// Substring marking base-color textures
    pub base_color_pattern: String,

    /// Substring marking normal maps
    pub normal_pattern: String,

    /// Substring marking roughness maps
    pub roughness_pattern: String,

    /// Texture compiler program, name or path
    pub compiler: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            base_color_pattern: DEFAULT_BASE_COLOR_PATTERN.to_string(),
            normal_pattern: DEFAULT_NORMAL_PATTERN.to_string(),
            roughness_pattern: DEFAULT_ROUGHNESS_PATTERN.to_string(),
            compiler: DEFAULT_COMPILER.to_string(),
        }
    }
}

impl DispatchConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;

        Ok(config)
    }

    /// Pattern configured for a texture kind
    pub fn pattern(&self, kind: TextureKind) -> &str {
        match kind {
            TextureKind::BaseColor => &self.base_color_pattern,
            TextureKind::Normal => &self.normal_pattern,
            TextureKind::Roughness => &self.roughness_pattern,
        }
    }

    /// Output path for a base name: `<dest>/<base>.dds`
    pub fn output_path(&self, base_name: impl AsRef<OsStr>) -> PathBuf {
        let mut file_name = base_name.as_ref().to_os_string();
        file_name.push(".dds");
        self.dest_dir.join(file_name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.source_dir.is_dir() {
            return Err(ConfigError::SourceDirNotFound(self.source_dir.clone()));
        }

        if !self.dest_dir.is_dir() {
            return Err(ConfigError::DestDirNotFound(self.dest_dir.clone()));
        }

        for kind in [TextureKind::BaseColor, TextureKind::Normal, TextureKind::Roughness] {
            if self.pattern(kind).is_empty() {
                return Err(ConfigError::EmptyPattern(kind));
            }
        }

        if self.compiler.trim().is_empty() {
            return Err(ConfigError::EmptyCompiler);
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Source directory not found: {0}")]
    SourceDirNotFound(PathBuf),

    #[error("Destination directory not found (it is not created automatically): {0}")]
    DestDirNotFound(PathBuf),

    #[error("Empty {0} pattern would match every file")]
    EmptyPattern(TextureKind),

    #[error("Texture compiler program is empty")]
    EmptyCompiler,
}
