//! Core data model for the JustDo client

mod entry;
mod task;
mod user;

// Re-export all types
pub use entry::{DoneEntry, EntryKind};
pub use task::Task;
pub use user::{TokenPair, User};
