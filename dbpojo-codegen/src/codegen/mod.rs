//! Code generation module

mod diff;
mod naming;
mod overwrite;
mod pojo_generator;
mod pojo_renderer;
mod type_mapper;

pub use diff::*;
pub use naming::*;
pub use overwrite::*;
pub use pojo_generator::*;
pub use pojo_renderer::*;
pub use type_mapper::*;
