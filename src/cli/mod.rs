//! CLI module: argument parsing, menu and prompts.

pub mod args;
pub mod menu;
pub mod prompts;

pub use args::Args;
pub use menu::{render_menu, MenuOption};
pub use prompts::{confirm, prompt_count, prompt_from, prompt_input};
