// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "scanner/mod.rs"]
pub mod scanner;
