//! CLI adapter: arguments, prompts, progress and output rendering.

pub mod args;
pub mod progress;
pub mod render;
pub mod tui;

pub use args::{Cli, Command};
pub use tui::{CliInputPort, prompt_handle};
