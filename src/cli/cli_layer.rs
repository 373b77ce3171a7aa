// CLI layer - argument parsing, terminal rendering and the interactive session.
// Stands where a GUI form would: it only translates operator input into
// core service calls and prints the results.

#[path = "args.rs"]
pub mod args;

#[path = "commands.rs"]
pub mod commands;

#[path = "render.rs"]
pub mod render;

#[path = "session.rs"]
pub mod session;

#[cfg(test)]
#[path = "test_api.rs"]
pub mod test_api;

pub use args::{Args, Command};
pub use commands::Outcome;
pub use render::Renderer;
