//! JustDo core - client library for the JustDo task board API.
//!
//! This crate provides the session lifecycle, the synchronized task
//! collection, and the lane reordering engine that turns a board
//! gesture into one global task order. The `justdo` binary is a thin
//! presentation layer over these pieces.

pub mod api;
pub mod board;
pub mod credentials;
pub mod error;
pub mod session;
pub mod store;
pub mod types;

pub use api::{ApiClient, NewDoneEntry, NewTask, TaskPatch};
pub use board::{reorder_by_move, BoardView, LaneKey, MoveRequest, Week};
pub use credentials::CredentialStore;
pub use error::{ApiError, Result};
pub use session::{SessionManager, SessionState};
pub use store::TaskStore;
pub use types::{DoneEntry, EntryKind, Task, TokenPair, User};
