//! Filename classification
//!
//! Texture kinds are detected by substring matching against the full entry
//! name. Rules are evaluated in a fixed order and the first match wins, so a
//! name containing both the base-color and normal patterns is base-color.

use std::ffi::OsStr;
use std::fmt;

use crate::config::DispatchConfig;

/// What a texture holds, as far as the compiler flags are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// Color data, sRGB encoded
    BaseColor,
    /// Tangent-space normal vectors
    Normal,
    /// Linear scalar data, no gamma correction
    Roughness,
}

impl TextureKind {
    /// Returns the display name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureKind::BaseColor => "base-color",
            TextureKind::Normal => "normal",
            TextureKind::Roughness => "roughness",
        }
    }

    /// Flags passed to the compiler for this kind.
    pub fn flags(self) -> CompileFlags {
        let base = CompileFlags::default();
        match self {
            TextureKind::BaseColor => base,
            TextureKind::Normal => CompileFlags { normal_map: true, ..base },
            TextureKind::Roughness => CompileFlags { linear: true, ..base },
        }
    }
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Block compression format requested from the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockFormat {
    /// BC3 / DXT5, RGBA with interpolated alpha
    BC3,
}

impl BlockFormat {
    pub fn name(&self) -> &'static str {
        match self {
            BlockFormat::BC3 => "BC3",
        }
    }
}

/// Compiler quality setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    High,
}

impl Quality {
    /// Value passed after `-q`
    pub fn arg(&self) -> &'static str {
        match self {
            Quality::High => "h",
        }
    }
}

/// Flag set for one compiler invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileFlags {
    pub format: BlockFormat,
    /// Generate the full mip chain
    pub mipmaps: bool,
    pub quality: Quality,
    /// Encode as a normal map (`-n`)
    pub normal_map: bool,
    /// Skip sRGB conversion (`--linear`)
    pub linear: bool,
}

impl Default for CompileFlags {
    fn default() -> Self {
        Self {
            format: BlockFormat::BC3,
            mipmaps: true,
            quality: Quality::High,
            normal_map: false,
            linear: false,
        }
    }
}

impl CompileFlags {
    /// Command-line arguments for these flags, excluding input and output.
    pub fn to_args(&self) -> Vec<&'static str> {
        let mut args = vec!["-t", self.format.name()];
        if self.mipmaps {
            args.push("-m");
        }
        args.push("-q");
        args.push(self.quality.arg());
        if self.normal_map {
            args.push("-n");
        }
        if self.linear {
            args.push("--linear");
        }
        args
    }
}

/// A single substring rule
#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    pattern: String,
    kind: TextureKind,
}

/// Ordered rule list, first match wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Builds the rules in priority order: base-color, normal, roughness.
    pub fn new(base_color: &str, normal: &str, roughness: &str) -> Self {
        let rule = |pattern: &str, kind| Rule {
            pattern: pattern.to_string(),
            kind,
        };

        Self {
            rules: vec![
                rule(base_color, TextureKind::BaseColor),
                rule(normal, TextureKind::Normal),
                rule(roughness, TextureKind::Roughness),
            ],
        }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(
            &config.base_color_pattern,
            &config.normal_pattern,
            &config.roughness_pattern,
        )
    }

    /// Classify a full entry name. `None` means unrecognized.
    pub fn classify(&self, file_name: &str) -> Option<TextureKind> {
        self.rules
            .iter()
            .find(|rule| file_name.contains(rule.pattern.as_str()))
            .map(|rule| rule.kind)
    }
}

/// Split an entry name into base name and extension.
///
/// The extension starts at the last `.` and keeps the dot. Leading dots do not
/// count, so `.hidden` has no extension. Works on the raw name so that bytes
/// which are not valid UTF-8 survive into the output path.
#[cfg(unix)]
pub fn split_name(file_name: &OsStr) -> (&OsStr, &OsStr) {
    use std::os::unix::ffi::OsStrExt;

    let bytes = file_name.as_bytes();
    match bytes.iter().rposition(|&b| b == b'.') {
        Some(dot) if bytes[..dot].iter().any(|&b| b != b'.') => (
            OsStr::from_bytes(&bytes[..dot]),
            OsStr::from_bytes(&bytes[dot..]),
        ),
        _ => (file_name, OsStr::new("")),
    }
}

/// Split an entry name into base name and extension.
///
/// Names that are not valid Unicode are left unsplit.
#[cfg(not(unix))]
pub fn split_name(file_name: &OsStr) -> (&OsStr, &OsStr) {
    let Some(name) = file_name.to_str() else {
        return (file_name, OsStr::new(""));
    };

    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => {
            let (base, ext) = name.split_at(dot);
            (OsStr::new(base), OsStr::new(ext))
        }
        _ => (file_name, OsStr::new("")),
    }
}
