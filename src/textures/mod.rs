//! Texture batch compilation
//!
//! Classifies source textures by filename and drives an external compiler
//! to produce BC3 `.dds` files with mip chains.

mod classify;
mod compiler;
mod dispatcher;

pub use classify::{split_name, BlockFormat, Classifier, CompileFlags, Quality, TextureKind};
pub use compiler::{
    command_args, command_line, CompileError, CompileStatus, CompilerInvoker, DryRunInvoker,
    Texturec,
};
pub use dispatcher::{CompiledTexture, DispatchReport, Dispatcher, FailedTexture};
