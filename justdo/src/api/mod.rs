//! REST API surface: the HTTP client and its request payload types.

mod client;
mod types;

pub use client::{get_api_url, ApiClient, DEFAULT_API_URL};
pub use types::{
    CreateTaskRequest, LoginRequest, NewDoneEntry, NewTask, RegisterRequest, RegisterResponse,
    ReorderRequest, TaskPatch,
};
