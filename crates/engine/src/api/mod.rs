//! API layer - command dispatch and rendering.

pub mod commands;
pub mod error_mapping;
pub(crate) mod handlers;
pub mod line_protocol;
pub mod render;

pub use commands::{Command, CommandHandler, CommandKind};
pub use line_protocol::serve_lines;
pub use render::{RenderControl, RenderField, RenderKind, RenderResult};
