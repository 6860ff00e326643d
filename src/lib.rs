//! texbatch - texture batch compiler driver
//!
//! Walks a directory of source textures, sorts them into base-color, normal
//! and roughness maps by filename, and runs an external texture compiler on
//! each one to produce BC3 `.dds` output.

pub mod config;
pub mod textures;
