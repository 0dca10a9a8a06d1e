//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`; the runtime
//! spawns them and routes the result through the inbox. They never touch
//! `AppState`.

mod analysis;
mod auth;
mod upload;

pub use analysis::*;
pub use auth::*;
pub use upload::*;
