//! Output module for shaping command results
//!
//! This module handles:
//! - The `{success, data}` / `{success, message, status}` response envelope
//! - Mapping failures onto status codes and process exit codes

mod response;

pub use response::{exit_code, write_response, ApiResponse, FAILURE_PREFIX};
