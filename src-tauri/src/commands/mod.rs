//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod collection_cmd;
mod task_cmd;
mod settings_cmd;

pub use collection_cmd::*;
pub use task_cmd::*;
pub use settings_cmd::*;

use nackle_store::DomainResult;

/// Log a failed command and convert the error for the frontend
pub(crate) fn report<T>(command: &str, result: DomainResult<T>) -> Result<T, String> {
    result.map_err(|e| {
        log::error!("{} failed: {}", command, e);
        e.to_string()
    })
}
