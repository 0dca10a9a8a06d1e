//! Full-screen TUI for cvlens.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::sync::Arc;

use anyhow::Result;
use cvlens_core::config::Config;
use cvlens_core::credentials::{CredentialStore, FileCredentialStore};
pub use features::{analysis, auth, upload};
pub use runtime::TuiRuntime;

/// Runs the interactive session until the user quits.
///
/// Must be called from within a tokio runtime; async effects are spawned on it.
///
/// # Errors
/// Returns an error if stdout is not a terminal or terminal I/O fails.
pub fn run_interactive(config: &Config) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `cvlens analyze <FILE>` for non-interactive analysis."
        );
    }

    let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::default_location());
    let mut runtime = TuiRuntime::new(config, store)?;
    runtime.run()
}
