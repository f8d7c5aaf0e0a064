//! CLI probe entry point.
//!
//! # Responsibility
//! - Open the default workspace and print a short summary.
//! - Verify `blocpad_core` wiring without any GUI runtime.

use std::process::ExitCode;

use blocpad_core::{default_log_level, init_logging, DocumentStore, JsonDocumentStore, Workspace};

fn main() -> ExitCode {
    let store = JsonDocumentStore::at_default_location();
    let log_dir = store.base_dir().join("logs");
    if let Err(message) = init_logging(default_log_level(), &log_dir) {
        eprintln!("logging unavailable: {message}");
    }

    match Workspace::open(store) {
        Ok(workspace) => {
            println!("blocpad_core version={}", blocpad_core::core_version());
            println!("workspace={}", workspace.location().display());
            println!(
                "folders={} files={}",
                workspace.document().folders.len(),
                workspace.document().file_count()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to open workspace: {err}");
            ExitCode::FAILURE
        }
    }
}
