// Core scanner module - the moderation-scanning client's business logic.
// Following the same pattern as the moderation module.

pub mod presentation;
pub mod scanner_models;
pub mod scanner_service;

pub use presentation::*;
pub use scanner_models::*;
pub use scanner_service::*;
